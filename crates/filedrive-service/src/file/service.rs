//! File management service.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use filedrive_core::config::UploadConfig;
use filedrive_core::error::{AppError, ErrorKind};
use filedrive_core::result::AppResult;
use filedrive_core::traits::ObjectStore;
use filedrive_database::repositories::FileMetadataRepository;
use filedrive_entity::file::{CreateFileRecord, FileRecord, sanitize_filename};

/// Coordinates the document store and the object store for file operations.
///
/// Upload writes the blob before the metadata document; delete removes the
/// blob before the metadata document. Both orderings bias failures toward
/// orphaned blobs rather than metadata pointing at missing content.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File metadata repository.
    repository: Arc<dyn FileMetadataRepository>,
    /// Blob storage backend.
    object_store: Arc<dyn ObjectStore>,
    /// Upload validation settings.
    config: UploadConfig,
}

/// Health of the service's two backing stores.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ServiceHealth {
    /// Whether the document store answered a health check.
    pub database: bool,
    /// Whether the object store answered a health check.
    pub object_store: bool,
}

impl ServiceHealth {
    /// Whether both stores are healthy.
    pub fn is_healthy(&self) -> bool {
        self.database && self.object_store
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        repository: Arc<dyn FileMetadataRepository>,
        object_store: Arc<dyn ObjectStore>,
        config: UploadConfig,
    ) -> Self {
        Self {
            repository,
            object_store,
            config,
        }
    }

    /// Lists all file records in upload order.
    pub async fn list(&self) -> AppResult<Vec<FileRecord>> {
        self.repository.find_all().await
    }

    /// Uploads a file: validates, stores the blob, then the metadata.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<FileRecord> {
        self.validate_content_type(content_type)?;
        self.validate_size(data.len())?;

        let name = sanitize_filename(file_name);
        let record = CreateFileRecord {
            name,
            size: data.len() as i64,
            content_type: content_type.to_string(),
        }
        .into_record();

        let key = record.file_id.to_string();
        self.object_store.put(&key, data, content_type).await?;

        // A metadata failure after the blob write leaves the blob behind;
        // the pairing between the stores is best-effort.
        self.repository.insert(&record).await?;

        info!(
            file_id = %record.file_id,
            name = %record.name,
            size = record.size,
            "Uploaded file"
        );
        Ok(record)
    }

    /// Downloads a file: returns its record and content bytes.
    pub async fn download(&self, file_id: Uuid) -> AppResult<(FileRecord, Bytes)> {
        let record = self.find_record(file_id).await?;

        let data = self
            .object_store
            .get(&file_id.to_string())
            .await
            .map_err(|e| {
                if e.kind == ErrorKind::NotFound {
                    // A record exists but its blob is gone. Surface as a
                    // storage fault, not a 404: the file should exist.
                    AppError::storage(format!("Blob missing for file {file_id}"))
                } else {
                    e
                }
            })?;

        Ok((record, data))
    }

    /// Renames a file. Only the `name` field changes.
    pub async fn rename(&self, file_id: Uuid, new_name: &str) -> AppResult<FileRecord> {
        let mut record = self.find_record(file_id).await?;

        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let name = sanitize_filename(trimmed);
        if name == record.name {
            // Nothing to change; skip the write entirely.
            return Ok(record);
        }

        if !self.repository.update_name(file_id, &name).await? {
            return Err(AppError::not_found(format!("File not found: {file_id}")));
        }

        info!(file_id = %file_id, from = %record.name, to = %name, "Renamed file");
        record.name = name;
        Ok(record)
    }

    /// Deletes a file: removes the blob first, then the metadata document.
    ///
    /// If the blob deletion fails, the metadata is retained so that the file
    /// stays visible and the delete can be retried.
    pub async fn delete(&self, file_id: Uuid) -> AppResult<()> {
        self.find_record(file_id).await?;

        self.object_store.delete(&file_id.to_string()).await?;
        self.repository.delete(file_id).await?;

        info!(file_id = %file_id, "Deleted file");
        Ok(())
    }

    /// Checks the health of both backing stores.
    pub async fn health(&self) -> ServiceHealth {
        ServiceHealth {
            database: self.repository.health_check().await.unwrap_or(false),
            object_store: self.object_store.health_check().await.unwrap_or(false),
        }
    }

    async fn find_record(&self, file_id: Uuid) -> AppResult<FileRecord> {
        self.repository
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File not found: {file_id}")))
    }

    fn validate_content_type(&self, content_type: &str) -> AppResult<()> {
        if content_type.trim().is_empty() {
            return Err(AppError::validation("Content type is required"));
        }
        if content_type_allowed(content_type, &self.config.allowed_content_types) {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Content type not allowed: {content_type}"
            )))
        }
    }

    fn validate_size(&self, size: usize) -> AppResult<()> {
        if size as u64 > self.config.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum size of {} bytes",
                self.config.max_file_size_bytes
            )));
        }
        Ok(())
    }
}

/// Check a MIME type against an allow-list.
///
/// Patterns may be exact (`application/pdf`), a type wildcard (`image/*`),
/// or the universal wildcard (`*/*`).
fn content_type_allowed(content_type: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|pattern| {
        if pattern == "*/*" {
            return true;
        }
        if let Some(prefix) = pattern.strip_suffix("/*") {
            return content_type
                .split('/')
                .next()
                .is_some_and(|t| t.eq_ignore_ascii_case(prefix));
        }
        pattern.eq_ignore_ascii_case(content_type)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use async_trait::async_trait;
    use filedrive_database::repositories::MemoryFileRepository;
    use filedrive_storage::LocalObjectStore;
    use tempfile::TempDir;

    async fn service_with(config: UploadConfig) -> (FileService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let service = FileService::new(
            Arc::new(MemoryFileRepository::new()),
            Arc::new(store),
            config,
        );
        (service, dir)
    }

    async fn service() -> (FileService, TempDir) {
        service_with(UploadConfig::default()).await
    }

    /// Memory repository wrapper that counts `update_name` calls and can
    /// fail inserts on demand.
    #[derive(Debug)]
    struct InstrumentedRepository {
        inner: MemoryFileRepository,
        fail_insert: bool,
        update_name_calls: AtomicUsize,
    }

    impl InstrumentedRepository {
        fn new() -> Self {
            Self {
                inner: MemoryFileRepository::new(),
                fail_insert: false,
                update_name_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FileMetadataRepository for InstrumentedRepository {
        async fn insert(&self, record: &FileRecord) -> AppResult<()> {
            if self.fail_insert {
                return Err(AppError::database("insert rejected"));
            }
            self.inner.insert(record).await
        }

        async fn find_by_id(&self, file_id: Uuid) -> AppResult<Option<FileRecord>> {
            self.inner.find_by_id(file_id).await
        }

        async fn find_all(&self) -> AppResult<Vec<FileRecord>> {
            self.inner.find_all().await
        }

        async fn update_name(&self, file_id: Uuid, name: &str) -> AppResult<bool> {
            self.update_name_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.update_name(file_id, name).await
        }

        async fn delete(&self, file_id: Uuid) -> AppResult<bool> {
            self.inner.delete(file_id).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }
    }

    #[tokio::test]
    async fn test_upload_then_list() {
        let (service, _dir) = service().await;

        let record = service
            .upload("report.pdf", "application/pdf", Bytes::from("content"))
            .await
            .unwrap();

        assert_eq!(record.name, "report.pdf");
        assert_eq!(record.size, 7);
        assert_eq!(record.extension, "pdf");

        let files = service.list().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0], record);
    }

    #[tokio::test]
    async fn test_upload_sanitizes_name() {
        let (service, _dir) = service().await;

        let record = service
            .upload("../../evil<name>.txt", "text/plain", Bytes::from("x"))
            .await
            .unwrap();

        assert_eq!(record.name, "evil_name_.txt");
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_content_type() {
        let config = UploadConfig {
            allowed_content_types: vec!["image/*".to_string(), "application/pdf".to_string()],
            ..UploadConfig::default()
        };
        let (service, _dir) = service_with(config).await;

        let err = service
            .upload("a.exe", "application/octet-stream", Bytes::from("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        service
            .upload("a.png", "image/png", Bytes::from("x"))
            .await
            .unwrap();
        service
            .upload("a.pdf", "application/pdf", Bytes::from("x"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_content_type() {
        let (service, _dir) = service().await;

        let err = service
            .upload("a.txt", "", Bytes::from("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let config = UploadConfig {
            max_file_size_bytes: 4,
            ..UploadConfig::default()
        };
        let (service, _dir) = service_with(config).await;

        let err = service
            .upload("big.bin", "application/octet-stream", Bytes::from("12345"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_download_round_trip() {
        let (service, _dir) = service().await;
        let data = Bytes::from("file body");

        let record = service
            .upload("doc.txt", "text/plain", data.clone())
            .await
            .unwrap();

        let (found, bytes) = service.download(record.file_id).await.unwrap();
        assert_eq!(found, record);
        assert_eq!(bytes, data);
    }

    #[tokio::test]
    async fn test_failed_metadata_insert_leaves_blob_in_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let repository = Arc::new(InstrumentedRepository {
            fail_insert: true,
            ..InstrumentedRepository::new()
        });
        let service = FileService::new(repository, Arc::new(store), UploadConfig::default());

        let err = service
            .upload("a.txt", "text/plain", Bytes::from("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);

        // The blob written before the failed insert stays behind; upload
        // does not roll it back.
        let blobs = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(blobs, 1);
    }

    #[tokio::test]
    async fn test_download_with_missing_blob_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let service = FileService::new(
            Arc::new(MemoryFileRepository::new()),
            Arc::new(store.clone()),
            UploadConfig::default(),
        );

        let record = service
            .upload("a.txt", "text/plain", Bytes::from("x"))
            .await
            .unwrap();

        // Remove the blob out from under the record.
        store.delete(&record.file_id.to_string()).await.unwrap();

        let err = service.download(record.file_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_download_unknown_id_is_not_found() {
        let (service, _dir) = service().await;

        let err = service.download(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_rename_keeps_extension_and_date() {
        let (service, _dir) = service().await;

        let record = service
            .upload("report.pdf", "application/pdf", Bytes::from("x"))
            .await
            .unwrap();

        let renamed = service.rename(record.file_id, "renamed.txt").await.unwrap();
        assert_eq!(renamed.name, "renamed.txt");
        assert_eq!(renamed.extension, "pdf");
        assert_eq!(renamed.upload_date, record.upload_date);

        let files = service.list().await.unwrap();
        assert_eq!(files[0].name, "renamed.txt");
        assert_eq!(files[0].extension, "pdf");
    }

    #[tokio::test]
    async fn test_rename_to_same_name_skips_store_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let repository = Arc::new(InstrumentedRepository::new());
        let service = FileService::new(
            repository.clone(),
            Arc::new(store),
            UploadConfig::default(),
        );

        let record = service
            .upload("a.txt", "text/plain", Bytes::from("x"))
            .await
            .unwrap();

        let renamed = service.rename(record.file_id, "a.txt").await.unwrap();
        assert_eq!(renamed, record);
        assert_eq!(renamed.upload_date, record.upload_date);
        assert_eq!(repository.update_name_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rename_empty_name_is_validation_error() {
        let (service, _dir) = service().await;

        let record = service
            .upload("a.txt", "text/plain", Bytes::from("x"))
            .await
            .unwrap();

        let err = service.rename(record.file_id, "   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_rename_unknown_id_is_not_found() {
        let (service, _dir) = service().await;

        let err = service.rename(Uuid::new_v4(), "x.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_blob() {
        let (service, _dir) = service().await;

        let record = service
            .upload("a.txt", "text/plain", Bytes::from("x"))
            .await
            .unwrap();

        service.delete(record.file_id).await.unwrap();

        assert!(service.list().await.unwrap().is_empty());
        let err = service.download(record.file_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let (service, _dir) = service().await;

        let err = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_health_reports_both_stores() {
        let (service, _dir) = service().await;

        let health = service.health().await;
        assert!(health.database);
        assert!(health.object_store);
        assert!(health.is_healthy());
    }

    #[test]
    fn test_content_type_allowed_patterns() {
        let allowed = vec!["image/*".to_string(), "application/pdf".to_string()];
        assert!(content_type_allowed("image/png", &allowed));
        assert!(content_type_allowed("application/pdf", &allowed));
        assert!(!content_type_allowed("text/plain", &allowed));
        assert!(content_type_allowed("text/plain", &["*/*".to_string()]));
    }
}
