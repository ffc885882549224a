//! # filedrive-database
//!
//! MongoDB connection management and the file metadata repository
//! implementations for FileDrive.

pub mod connection;
pub mod repositories;
