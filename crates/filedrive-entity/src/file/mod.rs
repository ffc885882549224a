//! File entity.

pub mod model;
pub mod sanitize;

pub use model::{CreateFileRecord, FileRecord};
pub use sanitize::sanitize_filename;
