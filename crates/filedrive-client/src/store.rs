//! Reactive client-side state container.
//!
//! `FileStore` owns a [`UiState`] snapshot published through a
//! `tokio::sync::watch` channel. Every mutation sends a fresh snapshot, so
//! UI code observes state by holding a receiver rather than polling.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use filedrive_entity::file::{FileRecord, sanitize_filename};

use crate::api::FileApi;
use crate::notification::{Notification, NotificationKind};

/// How long a notification stays visible unless dismissed earlier.
const NOTIFICATION_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Snapshot of everything the UI renders.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Mirror of the server-side file list.
    pub files: Vec<FileRecord>,
    /// File currently being renamed in the UI, if any.
    pub renaming: Option<Uuid>,
    /// Files with an in-flight rename request.
    pub saving: HashSet<Uuid>,
    /// Last surfaced error message.
    pub error: Option<String>,
    /// Whether an upload is in flight.
    pub upload_in_progress: bool,
    /// Name of the file being uploaded, while one is in flight.
    pub uploading_name: Option<String>,
    /// Active notifications, oldest first.
    pub notifications: Vec<Notification>,
}

struct StoreInner {
    api: Arc<dyn FileApi>,
    tx: watch::Sender<UiState>,
    next_notification_id: AtomicU64,
    dismiss_after: Duration,
}

impl std::fmt::Debug for StoreInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreInner").finish()
    }
}

/// Explicit state container driving all file operations.
///
/// Operations never return errors; failures are written into
/// `UiState::error` and surfaced as notifications.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: Arc<StoreInner>,
}

impl FileStore {
    /// Create a new store over the given API client.
    pub fn new(api: Arc<dyn FileApi>) -> Self {
        Self::with_dismiss_after(api, NOTIFICATION_DISMISS_AFTER)
    }

    /// Create a store with a custom notification lifetime.
    pub fn with_dismiss_after(api: Arc<dyn FileApi>, dismiss_after: Duration) -> Self {
        let (tx, _rx) = watch::channel(UiState::default());
        Self {
            inner: Arc::new(StoreInner {
                api,
                tx,
                next_notification_id: AtomicU64::new(1),
                dismiss_after,
            }),
        }
    }

    /// Subscribe to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.tx.subscribe()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> UiState {
        self.inner.tx.borrow().clone()
    }

    /// Fetch the full file list from the server, replacing `files`.
    pub async fn load(&self) {
        match self.inner.api.list().await {
            Ok(files) => {
                self.inner.tx.send_modify(|s| {
                    s.files = files;
                    s.error = None;
                });
            }
            Err(e) => self.fail(format!("Failed to load files: {}", e.message)),
        }
    }

    /// Upload a file and refresh the list on success.
    pub async fn upload(&self, name: &str, content_type: &str, data: Bytes) {
        self.inner.tx.send_modify(|s| {
            s.upload_in_progress = true;
            s.uploading_name = Some(name.to_string());
        });

        let result = self.inner.api.upload(name, content_type, data).await;

        match result {
            Ok(record) => {
                self.notify(
                    NotificationKind::Success,
                    format!("Uploaded {}", record.name),
                );
                self.load().await;
            }
            Err(e) => self.fail(format!("Upload failed: {}", e.message)),
        }

        self.inner.tx.send_modify(|s| {
            s.upload_in_progress = false;
            s.uploading_name = None;
        });
    }

    /// Mark a file as being renamed in the UI.
    pub fn start_rename(&self, file_id: Uuid) {
        self.inner.tx.send_modify(|s| s.renaming = Some(file_id));
    }

    /// Clear the rename-in-progress marker.
    pub fn cancel_rename(&self) {
        self.inner.tx.send_modify(|s| s.renaming = None);
    }

    /// Rename a file, patching only the affected record on success.
    ///
    /// A second call for the same file while the first is still in flight
    /// is dropped without a network call.
    pub async fn rename(&self, file_id: Uuid, new_name: &str) {
        let mut already_saving = false;
        self.inner.tx.send_modify(|s| {
            already_saving = !s.saving.insert(file_id);
        });
        if already_saving {
            debug!(%file_id, "Rename already in flight, skipping");
            return;
        }

        let result = self.inner.api.rename(file_id, new_name).await;

        match result {
            Ok(()) => {
                // Patch with the name the server stores, which is the
                // sanitized form of the submitted one.
                let name = sanitize_filename(new_name.trim());
                self.inner.tx.send_modify(|s| {
                    if let Some(record) = s.files.iter_mut().find(|r| r.file_id == file_id) {
                        record.name = name;
                    }
                    s.error = None;
                });
                self.notify(NotificationKind::Success, "File renamed");
            }
            Err(e) => self.fail(format!("Rename failed: {}", e.message)),
        }

        self.inner.tx.send_modify(|s| {
            s.saving.remove(&file_id);
            if s.renaming == Some(file_id) {
                s.renaming = None;
            }
        });
    }

    /// Delete a file and refresh the list.
    pub async fn delete(&self, file_id: Uuid) {
        match self.inner.api.delete(file_id).await {
            Ok(()) => {
                self.notify(NotificationKind::Success, "File deleted");
                self.load().await;
            }
            Err(e) => self.fail(format!("Delete failed: {}", e.message)),
        }
    }

    /// Push a notification; it auto-dismisses after the configured duration.
    pub fn notify(&self, kind: NotificationKind, text: impl Into<String>) -> u64 {
        let id = self
            .inner
            .next_notification_id
            .fetch_add(1, Ordering::Relaxed);

        self.inner.tx.send_modify(|s| {
            s.notifications.push(Notification {
                id,
                kind,
                text: text.into(),
            });
        });

        let store = self.clone();
        let dismiss_after = self.inner.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            store.dismiss(id);
        });

        id
    }

    /// Remove a notification by id. Dismissing twice is harmless.
    pub fn dismiss(&self, id: u64) {
        self.inner
            .tx
            .send_modify(|s| s.notifications.retain(|n| n.id != id));
    }

    fn fail(&self, message: String) {
        self.inner.tx.send_modify(|s| s.error = Some(message.clone()));
        self.notify(NotificationKind::Error, message);
    }
}
