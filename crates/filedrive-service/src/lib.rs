//! # filedrive-service
//!
//! Business logic for FileDrive. The [`file::FileService`] coordinates the
//! document store (metadata) and the object store (blobs) so that handlers
//! never touch either directly.

pub mod file;

pub use file::FileService;
