use crate::database::MongoDB;
use crate::models::DatingProfile;
use mongodb::bson::doc;

/// Seeds a handful of demo dating profiles for local development.
/// Only runs when SEED_DEMO_PROFILES=true and the collection has no
/// demo entries yet.
pub async fn seed_demo_profiles(db: &MongoDB) {
    let enabled = std::env::var("SEED_DEMO_PROFILES")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if !enabled {
        return;
    }

    let collection = db.collection::<DatingProfile>("profiles");

    let count = collection
        .count_documents(doc! { "uid": { "$regex": "^demo-" } })
        .await
        .unwrap_or(0);

    if count > 0 {
        log::info!("🌱 Demo profiles: {} already in DB — skipping seed", count);
        return;
    }

    log::info!("🌱 Seeding demo dating profiles...");

    let now = chrono::Utc::now().timestamp_millis();
    let profiles = build_demo_profiles(now);

    match collection.insert_many(&profiles).await {
        Ok(result) => {
            log::info!("   ✅ Inserted {} demo profiles", result.inserted_ids.len());
        }
        Err(e) => {
            log::error!("   ❌ Failed to seed demo profiles: {}", e);
        }
    }
}

fn build_demo_profiles(now: i64) -> Vec<DatingProfile> {
    let base = |uid: &str, offset: i64| DatingProfile {
        _id: None,
        uid: format!("demo-{}", uid),
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
        created_at: now - offset,
        updated_at: now - offset,
    };

    vec![
        DatingProfile {
            display_name: "أحمد".into(),
            age: Some(32),
            gender: Some("male".into()),
            city: Some("برلين".into()),
            country: Some("ألمانيا".into()),
            location: Some("برلين, ألمانيا".into()),
            bio: Some("مهندس برمجيات مقيم في برلين منذ خمس سنوات، أبحث عن شريكة حياة".into()),
            interests: vec!["سفر".into(), "قراءة".into(), "طبخ".into()],
            education: Some("ماجستير".into()),
            occupation: Some("مهندس برمجيات".into()),
            looking_for: Some("زواج".into()),
            marital_status: Some("أعزب".into()),
            religion: Some("مسلم".into()),
            languages: vec!["العربية".into(), "الألمانية".into(), "الإنجليزية".into()],
            verified: true,
            ..base("ahmed", 1_000)
        },
        DatingProfile {
            display_name: "ليلى".into(),
            age: Some(27),
            gender: Some("female".into()),
            city: Some("باريس".into()),
            country: Some("فرنسا".into()),
            location: Some("باريس, فرنسا".into()),
            bio: Some("صيدلانية أعيش في باريس، أحب الفن والموسيقى".into()),
            interests: vec!["فن".into(), "موسيقى".into()],
            education: Some("جامعي".into()),
            occupation: Some("صيدلانية".into()),
            looking_for: Some("زواج".into()),
            marital_status: Some("عزباء".into()),
            religion: Some("مسلمة".into()),
            languages: vec!["العربية".into(), "الفرنسية".into()],
            ..base("layla", 2_000)
        },
        DatingProfile {
            display_name: "سمير".into(),
            age: Some(35),
            gender: Some("male".into()),
            city: Some("تورونتو".into()),
            country: Some("كندا".into()),
            location: Some("تورونتو, كندا".into()),
            bio: Some("طبيب أسنان مهاجر حديثاً إلى كندا".into()),
            interests: vec!["رياضة".into(), "تصوير".into()],
            education: Some("دكتوراه".into()),
            occupation: Some("طبيب أسنان".into()),
            looking_for: Some("تعارف جاد".into()),
            marital_status: Some("أعزب".into()),
            religion: Some("مسلم".into()),
            languages: vec!["العربية".into(), "الإنجليزية".into()],
            ..base("samir", 3_000)
        },
        DatingProfile {
            display_name: "نور".into(),
            age: Some(29),
            gender: Some("female".into()),
            city: Some("أمستردام".into()),
            country: Some("هولندا".into()),
            location: Some("أمستردام, هولندا".into()),
            bio: Some("مصممة جرافيك، وصلت إلى هولندا قبل ثلاث سنوات".into()),
            interests: vec!["تصميم".into(), "سفر".into(), "يوغا".into()],
            education: Some("جامعي".into()),
            occupation: Some("مصممة جرافيك".into()),
            looking_for: Some("زواج".into()),
            marital_status: Some("عزباء".into()),
            religion: Some("مسلمة".into()),
            languages: vec!["العربية".into(), "الهولندية".into(), "الإنجليزية".into()],
            verified: true,
            ..base("nour", 4_000)
        },
    ]
}
