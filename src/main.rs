//! BiblioStaff Server - Library Staff Management System
//!
//! REST API server for managing library staff accounts.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibliostaff_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "bibliostaff_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BiblioStaff Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), config.email.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Admins: auth
        .route("/admin/register", post(api::admins::register))
        .route("/admin/login", post(api::admins::login))
        // Admins: CRUD
        .route("/admin", get(api::admins::list))
        .route("/admin/search", get(api::admins::search))
        .route("/admin/older-than/:age", get(api::admins::older_than))
        .route("/admin/:id", get(api::admins::get))
        .route("/admin/:id", put(api::admins::update))
        .route("/admin/:id", delete(api::admins::remove))
        .route("/admin/:id/status", patch(api::admins::change_status))
        // Admins: profile
        .route("/admin/:id/profile", put(api::admins::upsert_profile))
        .route("/admin/:id/profile", get(api::admins::get_profile))
        .route("/admin/:id/profile", delete(api::admins::delete_profile))
        // Admins: supervision
        .route("/admin/:id/librarians", get(api::admins::supervised_librarians))
        .route(
            "/admin/:id/librarians/:librarian_id",
            patch(api::admins::assign_librarian),
        )
        // Librarians: auth
        .route("/librarian/register", post(api::librarians::register))
        .route("/librarian/login", post(api::librarians::login))
        // Librarians: CRUD
        .route("/librarian", get(api::librarians::list))
        .route("/librarian/search", get(api::librarians::search))
        .route("/librarian/email/:email", get(api::librarians::get_by_email))
        .route(
            "/librarian/email/:email",
            delete(api::librarians::remove_by_email),
        )
        .route("/librarian/phone/:phone", get(api::librarians::get_by_phone))
        .route(
            "/librarian/phone/:phone",
            delete(api::librarians::remove_by_phone),
        )
        .route("/librarian/:id", get(api::librarians::get))
        .route("/librarian/:id", put(api::librarians::update))
        .route("/librarian/:id", delete(api::librarians::remove))
        .route("/librarian/:id/active", patch(api::librarians::change_active))
        // Librarians: profile
        .route("/librarian/:id/profile", put(api::librarians::upsert_profile))
        .route("/librarian/:id/profile", get(api::librarians::get_profile))
        .route(
            "/librarian/:id/profile",
            delete(api::librarians::delete_profile),
        )
        // Librarians: supervision
        .route(
            "/librarian/:id/supervisor/:admin_id",
            put(api::librarians::assign_supervisor),
        )
        .route(
            "/librarian/:id/supervisor",
            get(api::librarians::get_supervisor),
        )
        .route(
            "/librarian/supervisor/:admin_id",
            get(api::librarians::by_supervisor),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
