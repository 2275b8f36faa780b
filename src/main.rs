mod api;
mod database;
mod jobs;
mod middleware;
mod models;
mod seeds;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("🚀 Starting BabHijra Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    // 🌱 Seed demo profiles (development only, env-gated)
    seeds::demo_profiles_seed::seed_demo_profiles(&db).await;

    // 📅 Start background jobs
    log::info!("📅 Starting background jobs...");
    jobs::stats_scheduler::start_stats_scheduler(db.clone()).await;
    log::info!("✅ Background jobs started");

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000") // Astro frontend dev server
            .allowed_origin("http://localhost:4321")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://127.0.0.1:4321")
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CACHE_CONTROL,
                actix_web::http::header::PRAGMA,
            ])
            .expose_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth endpoints (public)
            .service(
                web::scope("/api/v1/auth")
                    .route("/login", web::post().to(api::auth::login))
                    .route("/register", web::post().to(api::auth::register))
                    .route("/refresh", web::post().to(api::auth::refresh_token))
                    .route("/google", web::get().to(api::auth::google_auth))
                    .route("/callback", web::get().to(api::auth::google_callback))
                    .route("/verify", web::get().to(api::auth::verify_token))
                    .route("/me", web::get().to(api::auth::get_me))
                    .route("/delete-account", web::delete().to(api::auth::delete_account)),
            )
            // Page config: analytics/ads gating for the SSR frontend (public)
            .route(
                "/api/v1/page-config",
                web::get().to(api::page_config::get_page_config),
            )
            // Account self-service
            .service(
                web::scope("/api/v1/users")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/me", web::get().to(api::users::get_my_account))
                    .route("/me", web::patch().to(api::users::update_my_account)),
            )
            // Dating profiles (own profile)
            .service(
                web::scope("/api/v1/profiles")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("", web::post().to(api::profiles::create_profile))
                    .route("/exists", web::get().to(api::profiles::profile_exists))
                    .route("/me", web::get().to(api::profiles::get_my_profile))
                    .route("/me", web::patch().to(api::profiles::update_my_profile))
                    .route("/me", web::delete().to(api::profiles::delete_my_profile)),
            )
            // Dating: browsing, likes and matches
            .service(
                web::scope("/api/v1/dating")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/profiles", web::get().to(api::dating::browse_profiles))
                    .route("/profiles/{uid}", web::get().to(api::dating::get_profile))
                    .route("/likes", web::get().to(api::dating::get_my_likes))
                    .route("/likes/{profile_id}", web::get().to(api::dating::is_liked))
                    .route("/likes/{profile_id}", web::post().to(api::dating::toggle_like))
                    .route("/matches", web::get().to(api::dating::get_matches)),
            )
            // Messaging inbox
            .service(
                web::scope("/api/v1/messages")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/conversations", web::get().to(api::messages::list_conversations))
                    .route("/conversations", web::post().to(api::messages::start_conversation))
                    .route("/unread", web::get().to(api::messages::unread_count))
                    .route(
                        "/{conversation_id}/messages",
                        web::get().to(api::messages::get_messages),
                    )
                    .route(
                        "/{conversation_id}/messages",
                        web::post().to(api::messages::send_message),
                    )
                    .route("/{conversation_id}/read", web::post().to(api::messages::mark_read)),
            )
            // Admin back office: role check happens inside the handlers
            .service(
                web::scope("/api/v1/admin")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/users", web::get().to(api::admin::list_users))
                    .route("/users/recent", web::get().to(api::admin::recent_users))
                    .route(
                        "/users/{uid}/activity",
                        web::get().to(api::admin::user_activity),
                    )
                    .route(
                        "/users/{uid}/toggle-status",
                        web::post().to(api::admin::toggle_user_status),
                    )
                    .route("/users/{uid}/verify", web::post().to(api::admin::set_verified))
                    .route("/users/{uid}/role", web::put().to(api::admin::update_user_role))
                    .route("/users/{uid}", web::delete().to(api::admin::delete_user))
                    .route("/profiles/{uid}", web::patch().to(api::admin::update_profile))
                    .route("/profiles/{uid}", web::delete().to(api::admin::delete_profile))
                    .route("/stats", web::get().to(api::admin::get_stats))
                    .route("/stats/refresh", web::post().to(api::admin::refresh_stats)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
