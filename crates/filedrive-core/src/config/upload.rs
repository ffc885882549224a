//! Upload validation configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to incoming uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum file size in bytes (default 100 MB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// Allowed MIME types. Entries may be exact (`application/pdf`),
    /// wildcarded (`image/*`), or `*/*` to admit everything.
    #[serde(default = "default_allowed_types")]
    pub allowed_content_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            allowed_content_types: default_allowed_types(),
        }
    }
}

fn default_max_file_size() -> u64 {
    104_857_600 // 100 MB
}

fn default_allowed_types() -> Vec<String> {
    vec!["*/*".to_string()]
}
