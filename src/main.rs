//! Librarium Server - Library Catalog
//!
//! A server-rendered catalog application for a small library.

use axum::{
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use librarium_server::{
    config::AppConfig,
    pages,
    render::Renderer,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("librarium_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Librarium Server v{}", env!("CARGO_PKG_VERSION"));

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

    // Load templates
    let renderer = Renderer::new(&config.templates.glob).expect("Failed to load templates");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        renderer: Arc::new(renderer),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        // Home
        .route("/", get(pages::home::index))
        // Authors
        .route("/authors", get(pages::authors::list))
        .route(
            "/author/create",
            get(pages::authors::create_get).post(pages::authors::create_post),
        )
        .route("/author/:id", get(pages::authors::detail))
        .route(
            "/author/:id/update",
            get(pages::authors::update_get).post(pages::authors::update_post),
        )
        .route(
            "/author/:id/delete",
            get(pages::authors::delete_get).post(pages::authors::delete_post),
        )
        // Books
        .route("/books", get(pages::books::list))
        .route(
            "/book/create",
            get(pages::books::create_get).post(pages::books::create_post),
        )
        .route("/book/:id", get(pages::books::detail))
        .route(
            "/book/:id/update",
            get(pages::books::update_get).post(pages::books::update_post),
        )
        .route(
            "/book/:id/delete",
            get(pages::books::delete_get).post(pages::books::delete_post),
        )
        // Book instances
        .route("/bookinstances", get(pages::instances::list))
        .route(
            "/bookinstance/create",
            get(pages::instances::create_get).post(pages::instances::create_post),
        )
        .route("/bookinstance/:id", get(pages::instances::detail))
        .route(
            "/bookinstance/:id/update",
            get(pages::instances::update_get).post(pages::instances::update_post),
        )
        .route(
            "/bookinstance/:id/delete",
            get(pages::instances::delete_get).post(pages::instances::delete_post),
        );

    Router::new()
        .route("/", get(pages::home::root))
        .route("/health", get(pages::health::health_check))
        .route("/ready", get(pages::health::readiness_check))
        .nest("/catalog", catalog)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
