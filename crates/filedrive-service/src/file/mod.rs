//! File management services — listing, upload, download, rename, delete.

pub mod service;

pub use service::{FileService, ServiceHealth};
