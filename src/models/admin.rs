use serde::{Deserialize, Serialize};

/// Filters accepted by the admin user directory. Each field treats `None`
/// and the literal "all" as absent.
#[derive(Debug, Deserialize, Clone, Default, utoipa::ToSchema)]
pub struct AdminFilters {
    pub search: Option<String>,
    pub role: Option<String>,     // "user" | "admin" | "all"
    pub status: Option<String>,   // "active" | "inactive" | "all"
    pub verified: Option<String>, // "verified" | "unverified" | "all"
}

impl AdminFilters {
    pub fn role_filter(&self) -> Option<&str> {
        self.role.as_deref().filter(|v| *v != "all")
    }

    pub fn status_filter(&self) -> Option<bool> {
        match self.status.as_deref() {
            Some("active") => Some(true),
            Some("inactive") => Some(false),
            _ => None,
        }
    }

    pub fn verified_filter(&self) -> Option<bool> {
        match self.verified.as_deref() {
            Some("verified") => Some(true),
            Some("unverified") => Some(false),
            _ => None,
        }
    }

    pub fn search_filter(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// Merged account + profile row for the admin back office. Never persisted.
#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
pub struct UserListItem {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub verified: bool,
    pub created_at: i64,
    pub profile_completion: u32,
}

/// One directory page plus the cursor to continue from.
#[derive(Debug, Serialize)]
pub struct DirectoryPage {
    pub items: Vec<UserListItem>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Cached platform statistics (`admin_stats/platform` document).
#[derive(Debug, Serialize, Deserialize, Clone, Default, utoipa::ToSchema)]
pub struct AdminStats {
    pub total_users: i64,
    pub active_users: i64,
    pub inactive_users: i64,
    pub verified_users: i64,
    pub new_users_this_week: i64,
    pub new_users_this_month: i64,
    pub total_profiles: i64,
    pub male_users: i64,
    pub female_users: i64,
    pub last_updated: i64,
}

/// Append-only activity log entry (`user_activity` collection).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserActivity {
    pub uid: String,
    pub action: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}
