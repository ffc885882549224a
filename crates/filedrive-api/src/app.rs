//! Application builder — wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;

use filedrive_core::config::AppConfig;
use filedrive_core::error::AppError;
use filedrive_service::FileService;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from a configured file service.
pub fn build_app(config: Arc<AppConfig>, file_service: Arc<FileService>) -> Router {
    build_router(AppState {
        config,
        file_service,
    })
}

/// Runs the FileDrive server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, file_service: Arc<FileService>) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(Arc::new(config), file_service);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FileDrive server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server shut down");
    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
