//! # filedrive-api
//!
//! HTTP layer for FileDrive: router, handlers, DTOs, error mapping, and the
//! server entry point.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
