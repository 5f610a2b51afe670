//! Shared server state: the latest feed snapshot and its status.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use maskdir_core::record::Snapshot;

/// Feed lifecycle as seen by API consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// No successful fetch has completed yet.
    Loading,
    /// The snapshot is current as of the last poll.
    Ready,
    /// The most recent poll failed. Any previously fetched snapshot is
    /// still served; the next scheduled poll retries.
    Error { message: String },
}

/// The directory's record store. One write guard covers a whole fetch
/// outcome, so readers always see the snapshot, its timestamp, and the
/// status move together.
#[derive(Debug)]
pub struct Directory {
    pub snapshot: Arc<Snapshot>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub status: FeedStatus,
}

impl Directory {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            snapshot: Arc::new(Vec::new()),
            fetched_at: None,
            status: FeedStatus::Loading,
        }
    }

    /// Whether any snapshot (current or stale) is available to serve.
    #[must_use]
    pub fn has_snapshot(&self) -> bool {
        self.fetched_at.is_some()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<RwLock<Directory>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            directory: Arc::new(RwLock::new(Directory::empty())),
        }
    }

    /// Installs a freshly fetched snapshot, wholesale-replacing the old one.
    pub async fn apply_snapshot(&self, snapshot: Snapshot) {
        let mut directory = self.directory.write().await;
        directory.snapshot = Arc::new(snapshot);
        directory.fetched_at = Some(Utc::now());
        directory.status = FeedStatus::Ready;
    }

    /// Records a failed poll without touching the last good snapshot.
    pub async fn apply_fetch_error(&self, message: String) {
        let mut directory = self.directory.write().await;
        directory.status = FeedStatus::Error { message };
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
