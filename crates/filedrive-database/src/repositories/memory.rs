//! In-process file metadata repository.
//!
//! Preserves insertion order, matching the listing behavior of the MongoDB
//! implementation on an unindexed collection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use filedrive_core::result::AppResult;
use filedrive_entity::file::FileRecord;

use crate::repositories::FileMetadataRepository;

/// Metadata repository holding all records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileRepository {
    records: Arc<RwLock<Vec<FileRecord>>>,
}

impl MemoryFileRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileMetadataRepository for MemoryFileRepository {
    async fn insert(&self, record: &FileRecord) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, file_id: Uuid) -> AppResult<Option<FileRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.file_id == file_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<FileRecord>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn update_name(&self, file_id: Uuid, name: &str) -> AppResult<bool> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.file_id == file_id) {
            Some(record) => {
                record.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, file_id: Uuid) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.file_id != file_id);
        Ok(records.len() < before)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
