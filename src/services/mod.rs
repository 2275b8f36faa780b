pub mod admin_service;
pub mod auth_service;
pub mod dating_service;
pub mod directory_service;
pub mod messaging_service;
pub mod profile_service;
pub mod user_service;
