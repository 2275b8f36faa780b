use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::api::request_claims;
use crate::{database::MongoDB, services::dating_service};

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub region: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dating/profiles",
    tag = "Dating",
    params(
        ("region" = Option<String>, Query, description = "all | europe | north-america")
    ),
    responses(
        (status = 200, description = "Active profiles, newest first")
    ),
    security(("bearer_auth" = []))
)]
pub async fn browse_profiles(
    db: web::Data<MongoDB>,
    query: web::Query<BrowseQuery>,
) -> HttpResponse {
    let region = query.region.as_deref().unwrap_or("all");
    log::info!("💕 GET /dating/profiles - region: {}", region);

    match dating_service::get_active_profiles(&db).await {
        Ok(profiles) => {
            let filtered = dating_service::filter_profiles_by_region(profiles, region);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "count": filtered.len(),
                "profiles": filtered
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to fetch profiles: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn get_profile(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let uid = path.into_inner();
    log::info!("💕 GET /dating/profiles/{}", uid);

    match dating_service::get_profile_by_id(&db, &uid).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "profile": profile
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "Profile not found"
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch profile {}: {}", uid, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/dating/likes/{profile_id}",
    tag = "Dating",
    responses(
        (status = 200, description = "Like toggled")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_like(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    let profile_id = path.into_inner();
    log::info!("❤️ POST /dating/likes/{} - by {}", profile_id, claims.sub);

    if profile_id == claims.sub {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Cannot like your own profile"
        }));
    }

    match dating_service::toggle_like(&db, &claims.sub, &profile_id).await {
        Ok(liked) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "liked": liked
        })),
        Err(e) => {
            log::error!("❌ Failed to toggle like: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn is_liked(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    let profile_id = path.into_inner();

    match dating_service::is_profile_liked(&db, &claims.sub, &profile_id).await {
        Ok(liked) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "liked": liked
        })),
        Err(e) => {
            log::error!("❌ Failed to check like: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn get_my_likes(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("❤️ GET /dating/likes - {}", claims.sub);

    match dating_service::get_user_likes(&db, &claims.sub).await {
        Ok(liked_ids) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "liked_profile_ids": liked_ids
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch likes: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dating/matches",
    tag = "Dating",
    responses(
        (status = 200, description = "Profile ids with mutual likes")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_matches(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("💞 GET /dating/matches - {}", claims.sub);

    match dating_service::get_matching_likes(&db, &claims.sub).await {
        Ok(matches) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "count": matches.len(),
            "matches": matches
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch matches: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
