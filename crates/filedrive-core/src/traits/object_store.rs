//! Object store trait for pluggable blob storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for blob storage backends.
///
/// Blobs are keyed by the generated `file_id` string; the metadata document
/// carrying the same key lives in the document store. Implementations exist
/// for S3-compatible services (MinIO) and the local filesystem. The
/// [`ObjectStore`] trait is defined here in `filedrive-core` and implemented
/// in `filedrive-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write a blob under the given key.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Read the blob stored under the given key into memory.
    ///
    /// Returns a `NotFound` error if no blob exists for the key.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Delete the blob stored under the given key.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
