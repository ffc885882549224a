//! # filedrive-core
//!
//! Core crate for FileDrive. Contains the seam traits, configuration
//! schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileDrive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
