//! # filedrive-entity
//!
//! Domain entity models for FileDrive.

pub mod file;
