//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod logging;
pub mod object_store;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::object_store::{LocalObjectStoreConfig, ObjectStoreConfig, S3ObjectStoreConfig};
pub use self::upload::UploadConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Object store settings.
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
    /// Upload validation settings.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Which provider to use: `"mongodb"` or `"memory"`.
    ///
    /// The memory provider keeps metadata in-process and is meant for tests
    /// and throwaway deployments.
    #[serde(default = "default_db_provider")]
    pub provider: String,
    /// MongoDB connection URL.
    #[serde(default = "default_db_url")]
    pub url: String,
    /// Database name holding the files collection.
    #[serde(default = "default_db_name")]
    pub database: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Server selection timeout in seconds.
    #[serde(default = "default_selection_timeout")]
    pub server_selection_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            object_store: ObjectStoreConfig::default(),
            upload: UploadConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `FILEDRIVE_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FILEDRIVE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: default_db_provider(),
            url: default_db_url(),
            database: default_db_name(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
            connect_timeout_seconds: default_connect_timeout(),
            server_selection_timeout_seconds: default_selection_timeout(),
        }
    }
}

fn default_db_provider() -> String {
    "mongodb".to_string()
}

fn default_db_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_db_name() -> String {
    "filedrive".to_string()
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_min_pool_size() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_selection_timeout() -> u64 {
    5
}
