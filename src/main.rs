//! FileDrive server — file management over MongoDB and S3-compatible storage.
//!
//! Main entry point that wires the backends together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use filedrive_core::config::AppConfig;
use filedrive_core::error::AppError;
use filedrive_database::connection::DatabaseHandle;
use filedrive_database::repositories::{
    FileMetadataRepository, MemoryFileRepository, MongoFileRepository,
};
use filedrive_service::FileService;

#[tokio::main]
async fn main() {
    let env = std::env::var("FILEDRIVE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        "Starting FileDrive v{} (env: {})",
        env!("CARGO_PKG_VERSION"),
        env
    );

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Initializing document store (provider: {})...",
        config.database.provider
    );
    let repository = build_repository(&config).await?;

    tracing::info!(
        "Initializing object store (provider: {})...",
        config.object_store.provider
    );
    let object_store = filedrive_storage::build_object_store(&config.object_store).await?;

    let file_service = Arc::new(FileService::new(
        repository,
        object_store,
        config.upload.clone(),
    ));

    filedrive_api::run_server(config, file_service).await
}

async fn build_repository(config: &AppConfig) -> Result<Arc<dyn FileMetadataRepository>, AppError> {
    match config.database.provider.as_str() {
        "mongodb" => {
            let handle = DatabaseHandle::connect(&config.database).await?;
            Ok(Arc::new(MongoFileRepository::new(handle)))
        }
        "memory" => Ok(Arc::new(MemoryFileRepository::new())),
        other => Err(AppError::configuration(format!(
            "Unknown database provider: {other}"
        ))),
    }
}
