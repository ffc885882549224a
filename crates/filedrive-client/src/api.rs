//! HTTP bindings for the FileDrive REST API.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use filedrive_core::error::{AppError, ErrorKind};
use filedrive_core::result::AppResult;
use filedrive_entity::file::FileRecord;

/// Client-side seam over the REST surface.
///
/// `HttpFileApi` is the production implementation; tests substitute
/// recording fakes.
#[async_trait]
pub trait FileApi: Send + Sync + 'static {
    /// Fetch all file records.
    async fn list(&self) -> AppResult<Vec<FileRecord>>;

    /// Upload a file, returning the created record.
    async fn upload(&self, name: &str, content_type: &str, data: Bytes) -> AppResult<FileRecord>;

    /// Download a file's content.
    async fn download(&self, file_id: Uuid) -> AppResult<Bytes>;

    /// Rename a file.
    async fn rename(&self, file_id: Uuid, new_name: &str) -> AppResult<()>;

    /// Delete a file.
    async fn delete(&self, file_id: Uuid) -> AppResult<()>;
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[allow(dead_code)]
    error: String,
    message: String,
}

/// Upload response body.
#[derive(Debug, Deserialize)]
struct UploadBody {
    file: FileRecord,
}

/// `FileApi` implementation over reqwest.
#[derive(Debug, Clone)]
pub struct HttpFileApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFileApi {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a non-success response into an `AppError`.
    ///
    /// The error kind is derived from the HTTP status; the message comes
    /// from the server's error body when one is present.
    async fn error_from_response(response: reqwest::Response) -> AppError {
        let status = response.status();
        let kind = match status.as_u16() {
            400 => ErrorKind::Validation,
            404 => ErrorKind::NotFound,
            503 => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::Internal,
        };

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("Request failed with status {status}"),
        };

        AppError::new(kind, message)
    }

    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::ServiceUnavailable, "Request failed", e)
}

fn decode_error(e: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::Serialization, "Failed to decode response", e)
}

#[async_trait]
impl FileApi for HttpFileApi {
    async fn list(&self) -> AppResult<Vec<FileRecord>> {
        let response = self
            .client
            .get(self.url("/files"))
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn upload(&self, name: &str, content_type: &str, data: Bytes) -> AppResult<FileRecord> {
        let part = reqwest::multipart::Part::stream(data)
            .file_name(name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::validation(format!("Invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/files/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let body: UploadBody = Self::check(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;
        Ok(body.file)
    }

    async fn download(&self, file_id: Uuid) -> AppResult<Bytes> {
        let response = self
            .client
            .get(self.url(&format!("/files/download/{file_id}")))
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response)
            .await?
            .bytes()
            .await
            .map_err(transport_error)
    }

    async fn rename(&self, file_id: Uuid, new_name: &str) -> AppResult<()> {
        let response = self
            .client
            .put(self.url(&format!("/files/{file_id}")))
            .query(&[("name", new_name)])
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, file_id: Uuid) -> AppResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/files/{file_id}")))
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response).await?;
        Ok(())
    }
}
