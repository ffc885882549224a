//! Request DTOs.

use serde::Deserialize;

/// Query parameters for the rename endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameParams {
    /// New file name.
    pub name: String,
}
