//! Response DTOs.

use serde::{Deserialize, Serialize};

use filedrive_entity::file::FileRecord;

/// Simple acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The newly created record.
    pub file: FileRecord,
}

/// Body returned by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Document store status: `"connected"` or `"unreachable"`.
    pub database: String,
    /// Object store status: `"available"` or `"unreachable"`.
    pub object_store: String,
}
