use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::request_claims;
use crate::services::user_service::UserUpdateRequest;
use crate::{database::MongoDB, services::user_service};

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Account document retrieved"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_my_account(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("👤 GET /users/me - {}", claims.sub);

    match user_service::get_user(&db, &claims.sub).await {
        Ok(Some(user)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": user
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "User not found"
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch user {}: {}", claims.sub, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    tag = "Users",
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "Account updated"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_my_account(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    body: web::Json<UserUpdateRequest>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("✏️ PATCH /users/me - {}", claims.sub);

    match user_service::update_user(&db, &claims.sub, &body).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Account updated"
        })),
        Err(e) => {
            log::warn!("❌ Failed to update user {}: {}", claims.sub, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
