//! Compass REST API
//!
//! HTTP API layer for Compass, built with Axum.
//!
//! # Endpoints
//!
//! ## Objectives
//! - `GET /api/v1/objectives` - List all objectives
//! - `POST /api/v1/objectives` - Append an objective
//! - `PUT /api/v1/objectives/:id` - Update an objective
//! - `DELETE /api/v1/objectives/:id` - Delete an objective
//! - `POST /api/v1/objectives/:id/move` - Reorder an objective
//! - `POST /api/v1/objectives/form` - Rebuild the list from form fields
//!
//! ## Charts
//! - `GET /api/v1/charts` - All chart configurations
//! - `GET /api/v1/charts/:kind` - One chart configuration
//!
//! ## Transfer
//! - `GET /api/v1/export` - Download CSV
//! - `POST /api/v1/import` - Upload CSV
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Live change feed
//!
//! # Example
//!
//! ```rust,ignore
//! use compass::api::{serve, AppState};
//! use compass::chart::SnapshotFactory;
//! use compass::config::Config;
//! use compass::persistence::JsonFileRepository;
//! use compass::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let repo = JsonFileRepository::open(&config.storage.data_dir, &config.storage.file_name)?;
//!     let session = Session::open(Box::new(repo), SnapshotFactory::default(), config.session_options());
//!
//!     let state = AppState::new(session, config.api.clone(), config.csv.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, ServerSession, SharedRepository};

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;
    let cors = cors_layer(&state.config);

    let api_routes = Router::new()
        // Objective routes
        .route(
            "/objectives",
            get(routes::objectives::list_objectives).post(routes::objectives::create_objective),
        )
        .route("/objectives/form", post(routes::objectives::submit_form))
        .route(
            "/objectives/:id",
            put(routes::objectives::update_objective).delete(routes::objectives::delete_objective),
        )
        .route("/objectives/:id/move", post(routes::objectives::move_objective))
        // Chart routes
        .route("/charts", get(routes::charts::get_charts))
        .route("/charts/:kind", get(routes::charts::get_chart))
        // Transfer routes
        .route("/export", get(routes::transfer::export_csv))
        .route("/import", post(routes::transfer::import_csv))
        .layer(DefaultBodyLimit::max(max_body_size))
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured front-end origins; permissive when none are set
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Compass API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Compass API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
