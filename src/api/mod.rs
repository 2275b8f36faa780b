pub mod admin;
pub mod auth;
pub mod dating;
pub mod health;
pub mod messages;
pub mod page_config;
pub mod profiles;
pub mod swagger;
pub mod users;

use actix_web::{HttpMessage, HttpRequest};

use crate::services::auth_service::Claims;

/// Authenticated identity inserted by the auth middleware.
pub fn request_claims(req: &HttpRequest) -> Option<Claims> {
    req.extensions().get::<Claims>().cloned()
}
