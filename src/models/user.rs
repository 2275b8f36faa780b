use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account document in the `users` collection.
/// Created at signup; `role` is only ever changed through the admin role endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserAccount {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub uid: String, // PRIMARY IDENTIFIER - shared with the profiles collection
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>, // None for OAuth accounts
    pub google_id: Option<String>,
    pub provider: Option<String>, // "local" or "google"
    #[serde(default = "default_role")]
    pub role: String, // "user" | "admin"
    pub created_at: i64, // epoch millis
    pub updated_at: i64,
    pub last_login: Option<i64>,
}

fn default_role() -> String {
    "user".to_string()
}

/// Public projection returned by auth endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: String,
}

impl From<UserAccount> for UserInfo {
    fn from(user: UserAccount) -> Self {
        UserInfo {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            role: user.role,
        }
    }
}
