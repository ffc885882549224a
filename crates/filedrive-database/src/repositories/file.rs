//! MongoDB-backed file metadata repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filedrive_core::error::{AppError, ErrorKind};
use filedrive_core::result::AppResult;
use filedrive_entity::file::FileRecord;

use crate::connection::DatabaseHandle;
use crate::repositories::FileMetadataRepository;

const COLLECTION: &str = "files";

/// BSON shape of a file record in the `files` collection.
///
/// `file_id` is stored as a string so that documents stay queryable from
/// the mongo shell without binary UUID handling.
#[derive(Debug, Serialize, Deserialize)]
struct FileDocument {
    file_id: String,
    name: String,
    size: i64,
    content_type: String,
    upload_date: DateTime<Utc>,
    extension: String,
}

impl From<&FileRecord> for FileDocument {
    fn from(record: &FileRecord) -> Self {
        Self {
            file_id: record.file_id.to_string(),
            name: record.name.clone(),
            size: record.size,
            content_type: record.content_type.clone(),
            upload_date: record.upload_date,
            extension: record.extension.clone(),
        }
    }
}

impl TryFrom<FileDocument> for FileRecord {
    type Error = AppError;

    fn try_from(doc: FileDocument) -> Result<Self, AppError> {
        let file_id = Uuid::parse_str(&doc.file_id).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Invalid file_id in document: {}", doc.file_id),
                e,
            )
        })?;
        Ok(Self {
            file_id,
            name: doc.name,
            size: doc.size,
            content_type: doc.content_type,
            upload_date: doc.upload_date,
            extension: doc.extension,
        })
    }
}

/// Repository over the `files` collection.
#[derive(Debug, Clone)]
pub struct MongoFileRepository {
    handle: DatabaseHandle,
}

impl MongoFileRepository {
    /// Create a new repository bound to a database handle.
    pub fn new(handle: DatabaseHandle) -> Self {
        Self { handle }
    }

    fn collection(&self) -> Collection<FileDocument> {
        self.handle.database().collection(COLLECTION)
    }
}

#[async_trait]
impl FileMetadataRepository for MongoFileRepository {
    async fn insert(&self, record: &FileRecord) -> AppResult<()> {
        self.collection()
            .insert_one(FileDocument::from(record))
            .await
            .map(|_| ())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert file record", e)
            })
    }

    async fn find_by_id(&self, file_id: Uuid) -> AppResult<Option<FileRecord>> {
        let doc = self
            .collection()
            .find_one(doc! { "file_id": file_id.to_string() })
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find file record", e)
            })?;

        doc.map(FileRecord::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<FileRecord>> {
        let mut cursor = self.collection().find(doc! {}).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list file records", e)
        })?;

        let mut records = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read file record cursor", e)
        })? {
            records.push(FileRecord::try_from(doc)?);
        }
        Ok(records)
    }

    async fn update_name(&self, file_id: Uuid, name: &str) -> AppResult<bool> {
        let result = self
            .collection()
            .update_one(
                doc! { "file_id": file_id.to_string() },
                doc! { "$set": { "name": name } },
            )
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update file name", e)
            })?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, file_id: Uuid) -> AppResult<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "file_id": file_id.to_string() })
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file record", e)
            })?;

        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.handle.ping().await.is_ok())
    }
}
