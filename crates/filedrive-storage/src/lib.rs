//! # filedrive-storage
//!
//! Object store providers for FileDrive. Each provider implements the
//! [`ObjectStore`] trait from `filedrive-core`.
//!
//! - [`S3ObjectStore`]: S3-compatible services (MinIO, AWS S3)
//! - [`LocalObjectStore`]: local filesystem, used in tests and small
//!   single-node deployments

pub mod local;
pub mod s3;

pub use filedrive_core::traits::ObjectStore;
pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;

use std::sync::Arc;

use filedrive_core::config::ObjectStoreConfig;
use filedrive_core::error::AppError;
use filedrive_core::result::AppResult;

/// Build an object store from configuration.
///
/// The `provider` field selects the backend: `"s3"` or `"local"`.
pub async fn build_object_store(config: &ObjectStoreConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "s3" => {
            let store = S3ObjectStore::new(&config.s3).await?;
            Ok(Arc::new(store))
        }
        "local" => {
            let store = LocalObjectStore::new(&config.local.root_path).await?;
            Ok(Arc::new(store))
        }
        other => Err(AppError::configuration(format!(
            "Unknown object store provider: {other}"
        ))),
    }
}
