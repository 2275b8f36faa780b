use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Primary paginated query could not execute. Propagated to the caller,
    /// no partial page is returned and no retry is attempted.
    QueryFailure(String),
    /// Counterpart document lookup failed or was absent. Recovered locally
    /// by substituting default field values.
    EnrichmentMiss(String),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::QueryFailure(msg) => write!(f, "Query failure: {}", msg),
            AppError::EnrichmentMiss(msg) => write!(f, "Enrichment miss: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
