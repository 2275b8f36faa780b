use crate::{
    database::MongoDB,
    models::{AdminStats, DatingProfile, UserAccount, UserActivity},
    services::auth_service,
};
use chrono::{Duration, Utc};
use futures::stream::StreamExt;
use mongodb::bson::doc;

const USERS: &str = "users";
const PROFILES: &str = "profiles";
const ADMIN_STATS: &str = "admin_stats";
const USER_ACTIVITY: &str = "user_activity";

/// Cached stats are considered fresh for one hour.
const STATS_TTL_MS: i64 = 60 * 60 * 1000;

/// Wrapper for the single cached stats document.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct StatsDocument {
    doc_id: String,
    #[serde(flatten)]
    stats: AdminStats,
}

/// Returns the cached platform stats, recalculating when stale or absent.
pub async fn get_admin_stats(db: &MongoDB) -> Result<AdminStats, String> {
    let collection = db.collection::<StatsDocument>(ADMIN_STATS);

    let cached = collection
        .find_one(doc! { "doc_id": "platform" })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let now = Utc::now().timestamp_millis();
    if let Some(document) = cached {
        if now - document.stats.last_updated < STATS_TTL_MS {
            return Ok(document.stats);
        }
    }

    refresh_admin_stats(db).await
}

/// Recalculates platform stats from live collections and stores the result.
pub async fn refresh_admin_stats(db: &MongoDB) -> Result<AdminStats, String> {
    let users = db.collection::<UserAccount>(USERS);
    let profiles = db.collection::<DatingProfile>(PROFILES);

    let now = Utc::now();
    let week_ago = (now - Duration::days(7)).timestamp_millis();
    let month_ago = (now - Duration::days(30)).timestamp_millis();

    let count =
        |e: mongodb::error::Error| format!("Stats count failed: {}", e);

    let total_users = users.count_documents(doc! {}).await.map_err(count)? as i64;
    let new_users_this_week = users
        .count_documents(doc! { "created_at": { "$gte": week_ago } })
        .await
        .map_err(count)? as i64;
    let new_users_this_month = users
        .count_documents(doc! { "created_at": { "$gte": month_ago } })
        .await
        .map_err(count)? as i64;

    let total_profiles = profiles.count_documents(doc! {}).await.map_err(count)? as i64;
    let active_users = profiles
        .count_documents(doc! { "is_active": true })
        .await
        .map_err(count)? as i64;
    let verified_users = profiles
        .count_documents(doc! { "verified": true })
        .await
        .map_err(count)? as i64;
    let male_users = profiles
        .count_documents(doc! { "gender": "male" })
        .await
        .map_err(count)? as i64;
    let female_users = profiles
        .count_documents(doc! { "gender": "female" })
        .await
        .map_err(count)? as i64;

    let stats = AdminStats {
        total_users,
        active_users,
        inactive_users: total_profiles - active_users,
        verified_users,
        new_users_this_week,
        new_users_this_month,
        total_profiles,
        male_users,
        female_users,
        last_updated: now.timestamp_millis(),
    };

    db.collection::<StatsDocument>(ADMIN_STATS)
        .replace_one(
            doc! { "doc_id": "platform" },
            &StatsDocument {
                doc_id: "platform".to_string(),
                stats: stats.clone(),
            },
        )
        .upsert(true)
        .await
        .map_err(|e| format!("Failed to cache stats: {}", e))?;

    log::info!(
        "📊 Platform stats refreshed: {} users, {} profiles",
        stats.total_users,
        stats.total_profiles
    );
    Ok(stats)
}

/// Most recently registered accounts for the dashboard panel.
pub async fn get_recent_users(db: &MongoDB, limit: i64) -> Result<Vec<UserAccount>, String> {
    let collection = db.collection::<UserAccount>(USERS);

    let mut cursor = collection
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .limit(limit)
        .await
        .map_err(|e| format!("Failed to fetch recent users: {}", e))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(user),
            Err(e) => log::error!("❌ Error reading user document: {}", e),
        }
    }

    Ok(users)
}

/// Activity log for one user, newest first. An empty (or never written)
/// collection yields an empty list rather than an error.
pub async fn get_user_activity(
    db: &MongoDB,
    uid: &str,
    limit: i64,
) -> Result<Vec<UserActivity>, String> {
    let collection = db.collection::<UserActivity>(USER_ACTIVITY);

    let mut cursor = collection
        .find(doc! { "uid": uid })
        .sort(doc! { "timestamp": -1 })
        .limit(limit)
        .await
        .map_err(|e| format!("Failed to fetch activity: {}", e))?;

    let mut entries = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(entry) => entries.push(entry),
            Err(e) => log::error!("❌ Error reading activity document: {}", e),
        }
    }

    Ok(entries)
}

pub async fn log_activity(
    db: &MongoDB,
    uid: &str,
    action: &str,
    details: Option<&str>,
) -> Result<(), String> {
    let entry = UserActivity {
        uid: uid.to_string(),
        action: action.to_string(),
        timestamp: Utc::now().timestamp_millis(),
        details: details.map(String::from),
        ip_address: None,
    };

    db.collection::<UserActivity>(USER_ACTIVITY)
        .insert_one(&entry)
        .await
        .map_err(|e| format!("Failed to log activity: {}", e))?;

    Ok(())
}

/// Flips the profile's `is_active` flag. Returns the new state.
pub async fn toggle_user_status(db: &MongoDB, uid: &str) -> Result<bool, String> {
    let collection = db.collection::<DatingProfile>(PROFILES);

    let profile = collection
        .find_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("Profile {} not found", uid))?;

    let new_state = !profile.is_active;
    collection
        .update_one(
            doc! { "uid": uid },
            doc! { "$set": {
                "is_active": new_state,
                "updated_at": Utc::now().timestamp_millis(),
            }},
        )
        .await
        .map_err(|e| format!("Failed to toggle status: {}", e))?;

    log::info!(
        "🔧 User {} is now {}",
        uid,
        if new_state { "active" } else { "inactive" }
    );
    Ok(new_state)
}

pub async fn set_profile_verified(db: &MongoDB, uid: &str, verified: bool) -> Result<(), String> {
    let collection = db.collection::<DatingProfile>(PROFILES);

    let result = collection
        .update_one(
            doc! { "uid": uid },
            doc! { "$set": {
                "verified": verified,
                "updated_at": Utc::now().timestamp_millis(),
            }},
        )
        .await
        .map_err(|e| format!("Failed to update verification: {}", e))?;

    if result.matched_count == 0 {
        return Err(format!("Profile {} not found", uid));
    }

    Ok(())
}

/// Admin-only role change. Only "user" and "admin" are accepted.
pub async fn update_user_role(db: &MongoDB, uid: &str, role: &str) -> Result<(), String> {
    if role != "user" && role != "admin" {
        return Err(format!("Invalid role: {}", role));
    }

    let collection = db.collection::<UserAccount>(USERS);
    let result = collection
        .update_one(
            doc! { "uid": uid },
            doc! { "$set": {
                "role": role,
                "updated_at": Utc::now().timestamp_millis(),
            }},
        )
        .await
        .map_err(|e| format!("Failed to update role: {}", e))?;

    if result.matched_count == 0 {
        return Err(format!("User {} not found", uid));
    }

    log::info!("🔧 Role of {} set to {}", uid, role);
    Ok(())
}

/// Full account removal: account, profile, likes in both directions and
/// the activity log. Same path as user-initiated deletion.
pub async fn delete_user(db: &MongoDB, uid: &str) -> Result<(), String> {
    auth_service::delete_user_account(db, uid).await
}
