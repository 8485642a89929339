//! Retry, removal, and runtime configuration updates.

use std::sync::atomic::Ordering;

use tracing::info;

use crate::config::BatchConfig;
use crate::error::Result;
use crate::types::{BatchStats, Event, FileId, FileRecord};

use super::BatchProcessor;

impl BatchProcessor {
    /// Reset all failed records to pending and run a processing pass
    ///
    /// Every `Error` record returns to `Pending` with its error cleared,
    /// then [`process_all`](Self::process_all) runs. This is the explicit
    /// retry path; the `auto_retry` config option folds the same re-attempt
    /// into a normal pass without the separate reset step.
    ///
    /// After the call resolves, no previously failed record remains
    /// `Pending` — each has either completed or failed again with a
    /// (possibly new) message.
    pub async fn retry_failed(&self) -> Result<()> {
        let reset = self.store.reset_failed().await;
        info!(reset = reset, "reset failed files for retry");
        self.process_all().await
    }

    /// Remove one file from the batch
    ///
    /// Emits a `FileRemoved` event when the record existed. Returns whether
    /// anything was removed. Must not be called concurrently with an active
    /// processing pass (caller obligation, see
    /// [`add_files`](Self::add_files)).
    pub async fn remove_file(&self, id: FileId) -> bool {
        let removed = self.store.remove(id).await;
        if removed {
            self.emit_event(Event::FileRemoved { id });
        }
        removed
    }

    /// Remove every file and clear the in-flight flag
    ///
    /// Clearing the flag lets a fresh pass start even if a previous pass was
    /// torn down abnormally. Same caller obligation as
    /// [`remove_file`](Self::remove_file) regarding active passes.
    pub async fn clear_all(&self) {
        self.store.clear().await;
        self.in_flight.store(false, Ordering::SeqCst);
        info!("cleared all files");
    }

    /// Snapshot of one record
    pub async fn record(&self, id: FileId) -> Option<FileRecord> {
        self.store.get(id).await
    }

    /// Snapshot of all records, ordered by id
    pub async fn records(&self) -> Vec<FileRecord> {
        self.store.list().await
    }

    /// Current aggregate batch state
    pub async fn stats(&self) -> BatchStats {
        self.store.stats().await
    }

    /// Current configuration (cloned)
    pub async fn config(&self) -> BatchConfig {
        self.config.read().await.clone()
    }

    /// Replace the configuration
    ///
    /// Takes effect on the next processing pass; a pass already in flight
    /// keeps the configuration it started with. `max_concurrent` is clamped
    /// to at least 1.
    pub async fn set_config(&self, config: BatchConfig) {
        let config = config.normalized();
        info!(
            max_concurrent = config.max_concurrent,
            auto_retry = config.auto_retry,
            stop_on_error = config.stop_on_error,
            "configuration updated"
        );
        *self.config.write().await = config;
    }
}
