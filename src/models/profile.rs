use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Dating profile document in the `profiles` collection.
/// Keyed by the same `uid` as the account. A profile may not exist for every
/// account — absence is a valid state, not corruption.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatingProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub uid: String,
    pub display_name: String,
    pub age: Option<u32>,
    pub gender: Option<String>, // "male" | "female"
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>, // derived: "city, country"
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub looking_for: Option<String>,
    pub marital_status: Option<String>,
    pub religion: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: i64, // epoch millis
    pub updated_at: i64,
}

/// Fields a user submits when completing onboarding. `location`, `verified`,
/// `is_active` and the timestamps are filled in by the service.
#[derive(Debug, Deserialize, Clone, utoipa::ToSchema)]
pub struct ProfileFormData {
    pub display_name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub looking_for: Option<String>,
    pub marital_status: Option<String>,
    pub religion: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}
