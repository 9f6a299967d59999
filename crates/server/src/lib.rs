//! health-server library crate
//!
//! Exposes `build_app`, `AppState`, and the component modules for
//! integration tests. The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
pub mod db;
mod error;
mod ingest;
mod middleware;
pub mod ocr;
mod routes;
pub mod storage;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware as axum_mw, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use health_core::RecognitionEngine;

use config::Config;

/// Uploads are whole image/PDF files; raise the default body limit.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared application state: every external collaborator the ingestion
/// pipeline depends on, constructed once at startup and injected here
/// instead of living in process globals.
#[derive(Clone)]
pub struct AppState {
    pub db: db::Database,
    pub uploads: storage::UploadStore,
    /// Recognition engine; `None` keeps extraction permanently degraded.
    pub engine: Option<Arc<dyn RecognitionEngine>>,
    /// Analysis client; `None` (no credential) skips the analysis stage.
    pub analyzer: Option<ai::ChatClient>,
}

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a TCP port.
pub fn build_app(state: AppState, config: &Config) -> Router {
    // Build CORS layer
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build application
    Router::new()
        .merge(routes::api_routes())
        .route("/health", get(routes::health::check))
        .with_state(state)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
