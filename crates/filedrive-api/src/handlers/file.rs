//! File listing, upload, download, rename, and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;

use filedrive_core::error::AppError;
use filedrive_entity::file::FileRecord;

use crate::dto::request::RenameParams;
use crate::error::ApiError;
use crate::dto::response::{MessageResponse, UploadResponse};
use crate::state::AppState;

/// GET /files
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let files = state.file_service.list().await?;
    Ok(Json(files))
}

/// POST /files/upload (multipart, field `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let (file_name, content_type, data) = read_file_field(multipart).await?;

    let record = state
        .file_service
        .upload(&file_name, &content_type, data)
        .await?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file: record,
    }))
}

/// GET /files/download/{file_id}
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let (record, data) = state.file_service.download(file_id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, record.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", record.name),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| ApiError::from(AppError::internal(format!("Response build failed: {e}"))))
}

/// PUT /files/{file_id}?name=...
pub async fn rename_file(
    State(state): State<AppState>,
    Path(file_id): Path<Uuid>,
    Query(params): Query<RenameParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.file_service.rename(file_id, &params.name).await?;
    Ok(Json(MessageResponse::new("File renamed successfully")))
}

/// DELETE /files/{file_id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.file_service.delete(file_id).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// Pull the `file` field out of a multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<(String, String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read file field: {e}")))?;

        return Ok((file_name, content_type, data));
    }

    Err(AppError::validation("Missing multipart field: file"))
}
