use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BabHijra API",
        version = "1.0.0",
        description = "Backend API for the BabHijra immigration and dating platform. \n\n**Authentication:** Most endpoints require JWT Bearer token authentication.\n\n**Features:**\n- Multi-provider authentication (Local, Google)\n- Dating profiles, likes and matches\n- Conversation inbox and messaging\n- Admin back office with a merged user directory\n- Per-route analytics/ads configuration",
        contact(
            name = "BabHijra Team",
            email = "support@babhijra.com"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::login,
        crate::api::auth::register,
        crate::api::auth::verify_token,
        crate::api::auth::get_me,

        // Health
        crate::api::health::health_check,

        // Users & profiles
        crate::api::users::get_my_account,
        crate::api::users::update_my_account,
        crate::api::profiles::create_profile,
        crate::api::profiles::get_my_profile,

        // Dating
        crate::api::dating::browse_profiles,
        crate::api::dating::toggle_like,
        crate::api::dating::get_matches,

        // Messages
        crate::api::messages::list_conversations,
        crate::api::messages::start_conversation,
        crate::api::messages::send_message,

        // Admin
        crate::api::admin::list_users,
        crate::api::admin::get_stats,
        crate::api::admin::toggle_user_status,
        crate::api::admin::update_user_role,

        // Page config
        crate::api::page_config::get_page_config,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::AuthResponse,
            crate::models::UserInfo,

            // Health
            crate::api::health::HealthResponse,

            // Users & profiles
            crate::services::user_service::UserUpdateRequest,
            crate::models::ProfileFormData,

            // Messages
            crate::api::messages::StartConversationRequest,
            crate::api::messages::SendMessageRequest,

            // Admin
            crate::models::AdminFilters,
            crate::models::UserListItem,
            crate::models::AdminStats,
            crate::api::admin::VerifyRequest,
            crate::api::admin::RoleRequest,
        )
    ),
    tags(
        (name = "Auth", description = "Authentication and account lifecycle. Supports local (email/password) and Google sign-in."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Users", description = "Self-service account endpoints."),
        (name = "Profiles", description = "Dating profile creation and maintenance."),
        (name = "Dating", description = "Profile browsing, likes and mutual matches."),
        (name = "Messages", description = "Conversation inbox and messaging."),
        (name = "Admin", description = "Back-office endpoints. Require an admin role claim."),
        (name = "PageConfig", description = "Per-route analytics and ads gating for the SSR frontend."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
