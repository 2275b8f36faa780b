use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Boundary between two directory pages. The resume query uses only
/// `created_at`; `uid` rides along for debugging. If two documents share a
/// creation timestamp the boundary is ambiguous — known limitation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub created_at: i64,
    pub uid: String,
}

impl PageCursor {
    /// Serializes the cursor into the opaque token handed to clients.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(token: &str) -> Result<Self, AppError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| AppError::InvalidRequest(format!("Malformed cursor: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::InvalidRequest(format!("Malformed cursor: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_round_trips() {
        let cursor = PageCursor {
            created_at: 1_700_000_000_123,
            uid: "user-42".into(),
        };
        let token = cursor.encode();
        let decoded = PageCursor::decode(&token).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn cursor_token_is_opaque() {
        let cursor = PageCursor {
            created_at: 1_700_000_000_123,
            uid: "user-42".into(),
        };
        let token = cursor.encode();
        assert!(!token.contains("user-42"));
        assert!(!token.contains("1700000000123"));
    }

    #[test]
    fn garbage_cursor_is_rejected() {
        assert!(PageCursor::decode("not a cursor !!").is_err());
        // Valid base64 but not a cursor payload
        assert!(PageCursor::decode("aGVsbG8").is_err());
    }
}
