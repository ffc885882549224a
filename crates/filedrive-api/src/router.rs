//! Route definitions for the FileDrive HTTP API.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Extra allowance on top of the file size limit, covering multipart
/// framing overhead. The service enforces the exact file size limit.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(file_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit as usize))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// File listing, upload, download, rename, delete.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload", post(handlers::file::upload_file))
        .route(
            "/files/download/{file_id}",
            get(handlers::file::download_file),
        )
        .route("/files/{file_id}", put(handlers::file::rename_file))
        .route("/files/{file_id}", delete(handlers::file::delete_file))
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
