use crate::{
    database::MongoDB,
    models::{DatingProfile, ProfileFormData},
};
use chrono::Utc;
use mongodb::bson::{doc, Document};

const COLLECTION: &str = "profiles";

/// Create or overwrite a user's dating profile.
pub async fn create_profile(db: &MongoDB, uid: &str, data: &ProfileFormData) -> Result<(), String> {
    let collection = db.collection::<DatingProfile>(COLLECTION);
    let now = Utc::now().timestamp_millis();

    let location = match (&data.city, &data.country) {
        (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
        _ => None,
    };

    let profile = DatingProfile {
        _id: None,
        uid: uid.to_string(),
        display_name: data.display_name.clone(),
        age: data.age,
        gender: data.gender.clone(),
        city: data.city.clone(),
        country: data.country.clone(),
        location,
        bio: data.bio.clone(),
        interests: data.interests.clone(),
        education: data.education.clone(),
        occupation: data.occupation.clone(),
        looking_for: data.looking_for.clone(),
        marital_status: data.marital_status.clone(),
        religion: data.religion.clone(),
        languages: data.languages.clone(),
        photos: data.photos.clone(),
        verified: false,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    // Upsert: completing onboarding twice overwrites, matching setDoc semantics
    collection
        .replace_one(doc! { "uid": uid }, &profile)
        .upsert(true)
        .await
        .map_err(|e| format!("Failed to create profile: {}", e))?;

    log::info!("✅ Dating profile created: {}", uid);
    Ok(())
}

pub async fn get_profile(db: &MongoDB, uid: &str) -> Result<Option<DatingProfile>, String> {
    let collection = db.collection::<DatingProfile>(COLLECTION);

    collection
        .find_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// Fields a partial update may never write: identity, timestamps and the
/// moderation flags. `verified` is granted through the admin verify endpoint
/// and `is_active` through the admin status toggle; accepting them here would
/// let a user stamp their own badge.
fn sanitize_update(mut update_set: Document) -> Document {
    for field in ["_id", "uid", "created_at", "verified", "is_active"] {
        update_set.remove(field);
    }
    update_set.insert("updated_at", Utc::now().timestamp_millis());
    update_set
}

/// Partial update; bumps `updated_at`.
pub async fn update_profile(
    db: &MongoDB,
    uid: &str,
    update_set: Document,
) -> Result<(), String> {
    let collection = db.collection::<DatingProfile>(COLLECTION);

    let update_set = sanitize_update(update_set);

    let result = collection
        .update_one(doc! { "uid": uid }, doc! { "$set": update_set })
        .await
        .map_err(|e| format!("Failed to update profile: {}", e))?;

    if result.matched_count == 0 {
        return Err(format!("Profile {} not found", uid));
    }

    Ok(())
}

pub async fn delete_profile(db: &MongoDB, uid: &str) -> Result<(), String> {
    let collection = db.collection::<DatingProfile>(COLLECTION);

    collection
        .delete_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Failed to delete profile: {}", e))?;

    Ok(())
}

pub async fn profile_exists(db: &MongoDB, uid: &str) -> Result<bool, String> {
    Ok(get_profile(db, uid).await?.is_some())
}

/// Completion percentage over the 14 canonical profile fields.
pub fn calculate_profile_completion(profile: &DatingProfile) -> u32 {
    const FIELD_COUNT: usize = 14;
    let mut completed = 0usize;

    if !profile.display_name.is_empty() {
        completed += 1;
    }
    if profile.age.is_some() {
        completed += 1;
    }

    let text_fields = [
        &profile.gender,
        &profile.city,
        &profile.country,
        &profile.bio,
        &profile.education,
        &profile.occupation,
        &profile.looking_for,
        &profile.marital_status,
        &profile.religion,
    ];
    for field in text_fields {
        if field.as_deref().map(|v| !v.is_empty()).unwrap_or(false) {
            completed += 1;
        }
    }

    let list_fields = [&profile.interests, &profile.languages, &profile.photos];
    for field in list_fields {
        if !field.is_empty() {
            completed += 1;
        }
    }

    ((completed as f64 / FIELD_COUNT as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_profile() -> DatingProfile {
        DatingProfile {
            _id: None,
            uid: "u1".into(),
            display_name: String::new(),
            age: None,
            gender: None,
            city: None,
            country: None,
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
    fn empty_profile_scores_zero() {
        assert_eq!(calculate_profile_completion(&empty_profile()), 0);
    }

    #[test]
    fn full_profile_scores_hundred() {
        let profile = DatingProfile {
            display_name: "ليلى".into(),
            age: Some(28),
            gender: Some("female".into()),
            city: Some("برلين".into()),
            country: Some("ألمانيا".into()),
            bio: Some("مرحبا".into()),
            interests: vec!["سفر".into()],
            education: Some("جامعي".into()),
            occupation: Some("مهندسة".into()),
            looking_for: Some("زواج".into()),
            marital_status: Some("عزباء".into()),
            religion: Some("مسلمة".into()),
            languages: vec!["العربية".into(), "الألمانية".into()],
            photos: vec!["photo-1.jpg".into()],
            ..empty_profile()
        };
        assert_eq!(calculate_profile_completion(&profile), 100);
    }

    #[test]
    fn partial_profile_rounds_to_nearest_percent() {
        let profile = DatingProfile {
            display_name: "سمير".into(),
            age: Some(31),
            gender: Some("male".into()),
            ..empty_profile()
        };
        // 3 of 14 fields -> 21.43 -> 21
        assert_eq!(calculate_profile_completion(&profile), 21);
    }

    #[test]
    fn update_strips_moderation_and_identity_fields() {
        let update = sanitize_update(doc! {
            "bio": "نبذة جديدة",
            "city": "فيينا",
            "verified": true,
            "is_active": false,
            "uid": "someone-else",
            "created_at": 1i64,
        });

        assert!(update.contains_key("bio"));
        assert!(update.contains_key("city"));
        assert!(update.contains_key("updated_at"));
        assert!(!update.contains_key("verified"));
        assert!(!update.contains_key("is_active"));
        assert!(!update.contains_key("uid"));
        assert!(!update.contains_key("created_at"));
    }

    #[test]
    fn empty_strings_do_not_count() {
        let profile = DatingProfile {
            display_name: "نور".into(),
            bio: Some(String::new()),
            ..empty_profile()
        };
        // only display_name counts: 1/14 -> 7
        assert_eq!(calculate_profile_completion(&profile), 7);
    }
}
