//! Object store configuration.

use serde::{Deserialize, Serialize};

/// Top-level object store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    /// Which provider to use: `"s3"` or `"local"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// S3-compatible storage configuration (MinIO in the reference deployment).
    #[serde(default)]
    pub s3: S3ObjectStoreConfig,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalObjectStoreConfig,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            s3: S3ObjectStoreConfig::default(),
            local: LocalObjectStoreConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3ObjectStoreConfig {
    /// Endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name holding all blobs.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

/// Local filesystem object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalObjectStoreConfig {
    /// Root path for stored blobs.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalObjectStoreConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_provider() -> String {
    "s3".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}
