use crate::{database::MongoDB, models::DatingProfile};
use chrono::Utc;
use futures::stream::StreamExt;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

const PROFILES: &str = "profiles";
const LIKES: &str = "likes";

/// Like document: one per (user, profile) pair, flattened from the
/// per-user subcollection shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Like {
    pub user_id: String,
    pub profile_id: String,
    pub created_at: i64,
}

/// All active dating profiles, newest first.
pub async fn get_active_profiles(db: &MongoDB) -> Result<Vec<DatingProfile>, String> {
    let collection = db.collection::<DatingProfile>(PROFILES);

    let mut cursor = collection
        .find(doc! { "is_active": true })
        .sort(doc! { "created_at": -1 })
        .await
        .map_err(|e| format!("Failed to fetch profiles: {}", e))?;

    let mut profiles = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(profile) => profiles.push(profile),
            Err(e) => log::error!("❌ Error reading profile document: {}", e),
        }
    }

    Ok(profiles)
}

pub async fn get_profile_by_id(db: &MongoDB, uid: &str) -> Result<Option<DatingProfile>, String> {
    let collection = db.collection::<DatingProfile>(PROFILES);

    collection
        .find_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// Toggle a like. Returns true if the profile is now liked, false if unliked.
pub async fn toggle_like(db: &MongoDB, user_id: &str, profile_id: &str) -> Result<bool, String> {
    let collection = db.collection::<Like>(LIKES);
    let filter = doc! { "user_id": user_id, "profile_id": profile_id };

    let existing = collection
        .find_one(filter.clone())
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    if existing.is_some() {
        collection
            .delete_one(filter)
            .await
            .map_err(|e| format!("Failed to unlike: {}", e))?;
        Ok(false)
    } else {
        let like = Like {
            user_id: user_id.to_string(),
            profile_id: profile_id.to_string(),
            created_at: Utc::now().timestamp_millis(),
        };
        collection
            .insert_one(&like)
            .await
            .map_err(|e| format!("Failed to like: {}", e))?;
        Ok(true)
    }
}

/// All profile ids this user has liked.
pub async fn get_user_likes(db: &MongoDB, user_id: &str) -> Result<Vec<String>, String> {
    let collection = db.collection::<Like>(LIKES);

    let mut cursor = collection
        .find(doc! { "user_id": user_id })
        .await
        .map_err(|e| format!("Failed to fetch likes: {}", e))?;

    let mut liked_ids = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(like) => liked_ids.push(like.profile_id),
            Err(e) => log::error!("❌ Error reading like document: {}", e),
        }
    }

    Ok(liked_ids)
}

pub async fn is_profile_liked(
    db: &MongoDB,
    user_id: &str,
    profile_id: &str,
) -> Result<bool, String> {
    let collection = db.collection::<Like>(LIKES);

    let existing = collection
        .find_one(doc! { "user_id": user_id, "profile_id": profile_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(existing.is_some())
}

/// Mutual likes: profile ids where both users liked each other.
/// One reverse point-check per liked profile.
pub async fn get_matching_likes(db: &MongoDB, user_id: &str) -> Result<Vec<String>, String> {
    let user_likes = get_user_likes(db, user_id).await?;

    if user_likes.is_empty() {
        return Ok(vec![]);
    }

    let collection = db.collection::<Like>(LIKES);
    let mut matches = Vec::new();

    for liked_id in user_likes {
        let reverse = collection
            .find_one(doc! { "user_id": &liked_id, "profile_id": user_id })
            .await
            .map_err(|e| format!("Database error: {}", e))?;

        if reverse.is_some() {
            matches.push(liked_id);
        }
    }

    Ok(matches)
}

const EUROPEAN_COUNTRIES: &[&str] = &[
    "ألمانيا", "بريطانيا", "فرنسا", "هولندا", "إسبانيا", "النمسا",
    "السويد", "بلجيكا", "إيطاليا", "الدنمارك", "النرويج", "أيرلندا",
    "البرتغال", "سويسرا",
];

const NORTH_AMERICAN_COUNTRIES: &[&str] = &["أمريكا", "كندا"];

/// In-memory region filter applied after the fetch. `all` passes everything.
pub fn filter_profiles_by_region(profiles: Vec<DatingProfile>, region: &str) -> Vec<DatingProfile> {
    let countries: &[&str] = match region {
        "europe" => EUROPEAN_COUNTRIES,
        "north-america" => NORTH_AMERICAN_COUNTRIES,
        _ => return profiles,
    };

    profiles
        .into_iter()
        .filter(|p| {
            p.country
                .as_deref()
                .map(|c| countries.contains(&c))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_in(country: &str) -> DatingProfile {
        DatingProfile {
            _id: None,
            uid: format!("u-{}", country),
            display_name: "اختبار".into(),
            age: None,
            gender: None,
            city: None,
            country: Some(country.to_string()),
            location: None,
            bio: None,
            interests: vec![],
            education: None,
            occupation: None,
            looking_for: None,
            marital_status: None,
            religion: None,
            languages: vec![],
            photos: vec![],
            verified: false,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn region_all_passes_everything() {
        let profiles = vec![profile_in("ألمانيا"), profile_in("كندا"), profile_in("مصر")];
        assert_eq!(filter_profiles_by_region(profiles, "all").len(), 3);
    }

    #[test]
    fn region_europe_keeps_european_countries_only() {
        let profiles = vec![profile_in("ألمانيا"), profile_in("كندا"), profile_in("فرنسا")];
        let filtered = filter_profiles_by_region(profiles, "europe");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.country.as_deref() != Some("كندا")));
    }

    #[test]
    fn region_north_america_keeps_us_and_canada() {
        let profiles = vec![profile_in("أمريكا"), profile_in("كندا"), profile_in("هولندا")];
        let filtered = filter_profiles_by_region(profiles, "north-america");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn missing_country_never_matches_a_region() {
        let mut profile = profile_in("x");
        profile.country = None;
        let filtered = filter_profiles_by_region(vec![profile], "europe");
        assert!(filtered.is_empty());
    }
}
