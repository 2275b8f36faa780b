use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::request_claims;
use crate::models::ProfileFormData;
use crate::{database::MongoDB, services::profile_service};

#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    tag = "Profiles",
    request_body = ProfileFormData,
    responses(
        (status = 201, description = "Profile created"),
        (status = 400, description = "Invalid profile data")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_profile(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    body: web::Json<ProfileFormData>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("📝 POST /profiles - {}", claims.sub);

    match profile_service::create_profile(&db, &claims.sub, &body).await {
        Ok(_) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "message": "Profile created"
        })),
        Err(e) => {
            log::error!("❌ Failed to create profile {}: {}", claims.sub, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/me",
    tag = "Profiles",
    responses(
        (status = 200, description = "Profile retrieved"),
        (status = 404, description = "No profile yet")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_my_profile(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("👤 GET /profiles/me - {}", claims.sub);

    match profile_service::get_profile(&db, &claims.sub).await {
        Ok(Some(profile)) => {
            let completion = profile_service::calculate_profile_completion(&profile);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "profile": profile,
                "completion": completion
            }))
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "Profile not found"
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch profile {}: {}", claims.sub, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn update_my_profile(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    body: web::Json<mongodb::bson::Document>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("✏️ PATCH /profiles/me - {}", claims.sub);

    match profile_service::update_profile(&db, &claims.sub, body.into_inner()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Profile updated"
        })),
        Err(e) => {
            log::warn!("❌ Failed to update profile {}: {}", claims.sub, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// Onboarding check: does the authenticated user have a profile yet?
pub async fn profile_exists(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };

    match profile_service::profile_exists(&db, &claims.sub).await {
        Ok(exists) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "exists": exists
        })),
        Err(e) => {
            log::error!("❌ Failed to check profile for {}: {}", claims.sub, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn delete_my_profile(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("🗑️ DELETE /profiles/me - {}", claims.sub);

    match profile_service::delete_profile(&db, &claims.sub).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Profile deleted"
        })),
        Err(e) => {
            log::error!("❌ Failed to delete profile {}: {}", claims.sub, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
