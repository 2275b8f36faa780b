use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::utils::routes::{is_ad_enabled_page, is_analytics_enabled_page};

#[derive(Debug, Deserialize)]
pub struct PageConfigQuery {
    pub path: String,
}

/// Tells the SSR frontend which scripts to inject for a path. Public on
/// purpose: it runs before any login.
#[utoipa::path(
    get,
    path = "/api/v1/page-config",
    tag = "PageConfig",
    params(
        ("path" = String, Query, description = "Pathname being rendered, e.g. /blog/my-post")
    ),
    responses(
        (status = 200, description = "Analytics and ads flags for the path")
    )
)]
pub async fn get_page_config(query: web::Query<PageConfigQuery>) -> HttpResponse {
    let path = &query.path;

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "path": path,
        "analytics": is_analytics_enabled_page(path),
        "ads": is_ad_enabled_page(path)
    }))
}
