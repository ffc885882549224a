//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use filedrive_core::config::{AppConfig, UploadConfig};
use filedrive_database::repositories::MemoryFileRepository;
use filedrive_service::FileService;
use filedrive_storage::LocalObjectStore;

const MULTIPART_BOUNDARY: &str = "filedrive-test-boundary";

/// Test application context: the router over an in-memory repository and a
/// temp-dir object store.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    // Keeps the blob directory alive for the test's duration.
    _blob_dir: TempDir,
}

impl TestApp {
    /// Create a test application with default upload limits.
    pub async fn new() -> Self {
        Self::with_upload_config(UploadConfig::default()).await
    }

    /// Create a test application with custom upload limits.
    pub async fn with_upload_config(upload: UploadConfig) -> Self {
        let blob_dir = tempfile::tempdir().expect("Failed to create blob dir");
        let object_store = LocalObjectStore::new(blob_dir.path().to_str().unwrap())
            .await
            .expect("Failed to init object store");

        let config = AppConfig {
            upload: upload.clone(),
            ..AppConfig::default()
        };

        let file_service = Arc::new(FileService::new(
            Arc::new(MemoryFileRepository::new()),
            Arc::new(object_store),
            upload,
        ));

        let router = filedrive_api::build_app(Arc::new(config), file_service);

        Self {
            router,
            _blob_dir: blob_dir,
        }
    }

    /// Make an HTTP request and parse the response body as JSON.
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a file through the multipart endpoint.
    pub async fn upload(&self, filename: &str, content_type: &str, content: &[u8]) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build upload request");

        self.send(req).await
    }

    /// Fetch raw bytes (for the download endpoint).
    pub async fn download(&self, path: &str) -> (StatusCode, http::HeaderMap, Vec<u8>) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 128 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        (status, headers, body.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
