use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::api::request_claims;
use crate::models::{AdminFilters, AdminStats, UserListItem};
use crate::services::auth_service::Claims;
use crate::utils::error::AppError;
use crate::{
    database::MongoDB,
    services::{admin_service, directory_service},
};

/// Every admin handler goes through this gate. The auth middleware already
/// verified the token; this checks the role claim.
fn require_admin(req: &HttpRequest) -> Result<Claims, HttpResponse> {
    match request_claims(req) {
        Some(claims) if claims.is_admin() => Ok(claims),
        Some(claims) => {
            log::warn!("🚫 Admin access denied for {}", claims.sub);
            Err(HttpResponse::Forbidden().json(serde_json::json!({
                "success": false,
                "error": "Admin access required"
            })))
        }
        None => Err(HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": "Missing authorization"
        }))),
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    pub page_size: Option<usize>,
    pub cursor: Option<String>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub verified: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "Admin",
    params(
        ("page_size" = Option<usize>, Query, description = "Rows per page (default 20, max 100)"),
        ("cursor" = Option<String>, Query, description = "Opaque continuation token"),
        ("search" = Option<String>, Query, description = "Name/email substring, current page only"),
        ("role" = Option<String>, Query, description = "user | admin | all"),
        ("status" = Option<String>, Query, description = "active | inactive | all"),
        ("verified" = Option<String>, Query, description = "verified | unverified | all")
    ),
    responses(
        (status = 200, description = "Merged user directory page", body = [UserListItem]),
        (status = 400, description = "Malformed cursor")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    query: web::Query<DirectoryQuery>,
) -> HttpResponse {
    let claims = match require_admin(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let query = query.into_inner();
    let filters = AdminFilters {
        search: query.search,
        role: query.role,
        status: query.status,
        verified: query.verified,
    };
    let page_size = query.page_size.unwrap_or(directory_service::DEFAULT_PAGE_SIZE);

    log::info!("📋 GET /admin/users - by {} ({:?})", claims.sub, filters);

    match directory_service::list_users(&db, &filters, page_size, query.cursor.as_deref()).await {
        Ok(page) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "users": page.items,
            "next_cursor": page.next_cursor,
            "has_more": page.has_more
        })),
        Err(AppError::InvalidRequest(msg)) => {
            log::warn!("❌ Bad directory request: {}", msg);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": msg
            }))
        }
        Err(e) => {
            log::error!("❌ Directory listing failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Cached platform statistics", body = AdminStats)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_stats(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    if let Err(resp) = require_admin(&req) {
        return resp;
    }
    log::info!("📊 GET /admin/stats");

    match admin_service::get_admin_stats(&db).await {
        Ok(stats) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "stats": stats
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch stats: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

pub async fn recent_users(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&req) {
        return resp;
    }
    let limit = query.limit.unwrap_or(10).clamp(1, 50);

    match admin_service::get_recent_users(&db, limit).await {
        Ok(users) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "users": users
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch recent users: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn user_activity(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&req) {
        return resp;
    }
    let uid = path.into_inner();
    let limit = query.limit.unwrap_or(50).clamp(1, 200);

    match admin_service::get_user_activity(&db, &uid, limit).await {
        Ok(entries) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "activity": entries
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch activity for {}: {}", uid, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{uid}/toggle-status",
    tag = "Admin",
    responses(
        (status = 200, description = "Profile active flag flipped"),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_user_status(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let claims = match require_admin(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let uid = path.into_inner();
    log::info!("🔧 POST /admin/users/{}/toggle-status - by {}", uid, claims.sub);

    match admin_service::toggle_user_status(&db, &uid).await {
        Ok(is_active) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "is_active": is_active
        })),
        Err(e) => {
            log::warn!("❌ Failed to toggle status for {}: {}", uid, e);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct VerifyRequest {
    pub verified: bool,
}

pub async fn set_verified(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<VerifyRequest>,
) -> HttpResponse {
    let claims = match require_admin(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let uid = path.into_inner();
    log::info!(
        "🔧 POST /admin/users/{}/verify ({}) - by {}",
        uid,
        body.verified,
        claims.sub
    );

    match admin_service::set_profile_verified(&db, &uid, body.verified).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "verified": body.verified
        })),
        Err(e) => {
            log::warn!("❌ Failed to update verification for {}: {}", uid, e);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RoleRequest {
    pub role: String,
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{uid}/role",
    tag = "Admin",
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role updated"),
        (status = 400, description = "Invalid role")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user_role(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<RoleRequest>,
) -> HttpResponse {
    let claims = match require_admin(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let uid = path.into_inner();

    // An admin demoting themselves locks the back office
    if uid == claims.sub && body.role != "admin" {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Cannot remove your own admin role"
        }));
    }

    log::info!("🔧 PUT /admin/users/{}/role ({}) - by {}", uid, body.role, claims.sub);

    match admin_service::update_user_role(&db, &uid, &body.role).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "role": body.role
        })),
        Err(e) => {
            log::warn!("❌ Failed to update role for {}: {}", uid, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn delete_user(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let claims = match require_admin(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let uid = path.into_inner();

    if uid == claims.sub {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Use the account deletion endpoint to remove your own account"
        }));
    }

    log::info!("🗑️ DELETE /admin/users/{} - by {}", uid, claims.sub);

    match admin_service::delete_user(&db, &uid).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "User deleted"
        })),
        Err(e) => {
            log::error!("❌ Failed to delete user {}: {}", uid, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// Moderation: edit any profile's fields by uid.
pub async fn update_profile(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<mongodb::bson::Document>,
) -> HttpResponse {
    let claims = match require_admin(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let uid = path.into_inner();
    log::info!("🔧 PATCH /admin/profiles/{} - by {}", uid, claims.sub);

    match crate::services::profile_service::update_profile(&db, &uid, body.into_inner()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Profile updated"
        })),
        Err(e) => {
            log::warn!("❌ Failed to update profile {}: {}", uid, e);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// Moderation: remove a profile while keeping the account.
pub async fn delete_profile(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let claims = match require_admin(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let uid = path.into_inner();
    log::info!("🗑️ DELETE /admin/profiles/{} - by {}", uid, claims.sub);

    match crate::services::profile_service::delete_profile(&db, &uid).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Profile deleted"
        })),
        Err(e) => {
            log::error!("❌ Failed to delete profile {}: {}", uid, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn refresh_stats(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    if let Err(resp) = require_admin(&req) {
        return resp;
    }
    log::info!("📊 POST /admin/stats/refresh");

    match admin_service::refresh_admin_stats(&db).await {
        Ok(stats) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "stats": stats
        })),
        Err(e) => {
            log::error!("❌ Failed to refresh stats: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
