use crate::{database::MongoDB, models::UserAccount};
use chrono::Utc;
use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;

const COLLECTION: &str = "users";

/// Self-service account update. `role` is never accepted here — role changes
/// go through the admin endpoint only.
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct UserUpdateRequest {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

pub async fn get_user(db: &MongoDB, uid: &str) -> Result<Option<UserAccount>, String> {
    let collection = db.collection::<UserAccount>(COLLECTION);

    collection
        .find_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// Applies a self-service update. Only whitelisted fields reach the database,
/// which closes the privilege-escalation hole of accepting a raw document.
pub async fn update_user(
    db: &MongoDB,
    uid: &str,
    request: &UserUpdateRequest,
) -> Result<(), String> {
    let collection = db.collection::<UserAccount>(COLLECTION);

    let mut update_set = Document::new();
    if let Some(name) = &request.display_name {
        update_set.insert("display_name", name.as_str());
    }
    if let Some(url) = &request.photo_url {
        update_set.insert("photo_url", url.as_str());
    }

    if update_set.is_empty() {
        return Ok(());
    }

    update_set.insert("updated_at", Bson::Int64(Utc::now().timestamp_millis()));

    let result = collection
        .update_one(doc! { "uid": uid }, doc! { "$set": update_set })
        .await
        .map_err(|e| format!("Failed to update user: {}", e))?;

    if result.matched_count == 0 {
        return Err(format!("User {} not found", uid));
    }

    Ok(())
}
