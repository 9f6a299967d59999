//! health-server: family health records HTTP server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use health_core::RecognitionEngine;
use health_server::ai::ChatClient;
use health_server::config::Config;
use health_server::db::Database;
use health_server::ocr::TesseractCli;
use health_server::storage::UploadStore;
use health_server::{AppState, build_app};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::load();

    // Open the records store
    let db = Database::open(&config.database_path)
        .await
        .expect("Failed to open database");

    // Prepare the upload directory
    let uploads = UploadStore::new(&config.upload_dir);
    uploads
        .ensure_dir()
        .await
        .expect("Failed to create upload directory");

    // Probe for a recognition engine; absence is a supported degraded mode
    let engine: Option<Arc<dyn RecognitionEngine>> = TesseractCli::detect()
        .map(|engine| Arc::new(engine) as Arc<dyn RecognitionEngine>);
    match &engine {
        Some(engine) => tracing::info!(engine = engine.name(), "Recognition engine ready"),
        None => tracing::warn!("No recognition engine available, text extraction disabled"),
    }

    // Build the analysis client if a credential is configured
    let analyzer = config.analysis_api_key.as_ref().map(|key| {
        ChatClient::new(
            key.clone(),
            &config.analysis_base_url,
            config.analysis_model.clone(),
            Duration::from_secs(config.analysis_timeout_secs),
        )
    });
    if analyzer.is_some() {
        tracing::info!(model = %config.analysis_model, "Analysis service configured");
    } else {
        tracing::warn!("analysis_api_key not set, report analysis disabled");
    }

    // Build application
    let state = AppState {
        db,
        uploads,
        engine,
        analyzer,
    };
    let app = build_app(state, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting health server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
