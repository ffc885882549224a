//! File record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata describing one uploaded file.
///
/// The record lives in the document store; the content blob lives in the
/// object store under the same `file_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file identifier; key in both stores.
    pub file_id: Uuid,
    /// User-visible file name (sanitized, including extension).
    pub name: String,
    /// Content length in bytes.
    pub size: i64,
    /// MIME type of the content.
    pub content_type: String,
    /// When the file was uploaded.
    pub upload_date: DateTime<Utc>,
    /// Extension derived from the name at upload time.
    ///
    /// Deliberately not recomputed on rename: it records what was uploaded,
    /// not what the file is currently called.
    pub extension: String,
}

impl FileRecord {
    /// Derive the lowercase extension (without dot) from a file name.
    pub fn extension_of(name: &str) -> String {
        name.rsplit('.')
            .next()
            .filter(|ext| *ext != name && !ext.is_empty())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default()
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Sanitized file name.
    pub name: String,
    /// Content length in bytes.
    pub size: i64,
    /// MIME type of the content.
    pub content_type: String,
}

impl CreateFileRecord {
    /// Materialize a full record with a fresh id and the current timestamp.
    pub fn into_record(self) -> FileRecord {
        let extension = FileRecord::extension_of(&self.name);
        FileRecord {
            file_id: Uuid::new_v4(),
            name: self.name,
            size: self.size,
            content_type: self.content_type,
            upload_date: Utc::now(),
            extension,
        }
    }
}
