//! # filedrive-client
//!
//! Client-side layer for FileDrive: the [`FileApi`] trait over the REST
//! surface, its reqwest implementation, and the [`FileStore`] reactive state
//! container that UI code observes through a watch channel.

pub mod api;
pub mod notification;
pub mod store;

pub use api::{FileApi, HttpFileApi};
pub use notification::{Notification, NotificationKind};
pub use store::{FileStore, UiState};
