//! Shared application state threaded through all handlers.

use std::sync::Arc;

use filedrive_core::config::AppConfig;
use filedrive_service::FileService;

/// Application state available to every handler via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Full application configuration.
    pub config: Arc<AppConfig>,
    /// File management service.
    pub file_service: Arc<FileService>,
}
