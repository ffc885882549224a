//! File metadata repositories.
//!
//! The [`FileMetadataRepository`] trait is the seam between the service
//! layer and the document store. `MongoFileRepository` is the production
//! implementation; `MemoryFileRepository` backs tests and single-process
//! deployments without a MongoDB instance.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use filedrive_core::result::AppResult;
use filedrive_entity::file::FileRecord;

pub use file::MongoFileRepository;
pub use memory::MemoryFileRepository;

/// Trait for file metadata persistence.
#[async_trait]
pub trait FileMetadataRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new record.
    async fn insert(&self, record: &FileRecord) -> AppResult<()>;

    /// Find a record by its file id.
    async fn find_by_id(&self, file_id: Uuid) -> AppResult<Option<FileRecord>>;

    /// List all records in store insertion order.
    async fn find_all(&self) -> AppResult<Vec<FileRecord>>;

    /// Update only the `name` field of a record.
    ///
    /// Returns `false` if no record matched the id.
    async fn update_name(&self, file_id: Uuid, name: &str) -> AppResult<bool>;

    /// Delete a record. Returns `false` if no record matched the id.
    async fn delete(&self, file_id: Uuid) -> AppResult<bool>;

    /// Check whether the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
