//! # Tinta API
//!
//! HTTP surface for the studio's booking system. It exposes the public
//! slot listing and booking flow, and the administrator's agenda
//! management, on top of the booking engine in `tinta-core`.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP to booking-engine calls
//! - **Middleware**: Admin session gate and error-to-HTTP mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; persistence is whatever
//! `SlotStore` the state was built with (Postgres in production, a
//! mock in tests).

/// Configuration module for API settings
pub mod config;
/// Request handlers that invoke the booking engine
pub mod handlers;
/// Middleware for the admin gate and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tinta_core::store::SlotStore;
use tinta_db::store::PgSlotStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers.
pub struct ApiState {
    /// Persistence handle the booking engine operates through
    pub store: Arc<dyn SlotStore>,
    /// Shared secret identifying the administrator, if configured
    pub admin_token: Option<String>,
}

/// Starts the API server with the provided configuration and database
/// connection.
///
/// Initializes logging, builds the router, applies CORS/timeout layers
/// and serves until shutdown.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        store: Arc::new(PgSlotStore::new(db_pool)),
        admin_token: config.admin_token.clone(),
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public booking endpoints
        .merge(routes::slots::routes())
        // Administrator agenda endpoints
        .merge(routes::admin::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
