//! Transient UI notifications.

use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient message shown to the user.
///
/// Notifications are auto-dismissed by the store after a fixed duration
/// unless dismissed explicitly first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Store-assigned identifier, unique within the store's lifetime.
    pub id: u64,
    /// Severity.
    pub kind: NotificationKind,
    /// Message text.
    pub text: String,
}
