//! In-memory file record store.
//!
//! Holds the authoritative set of [`FileRecord`]s and exposes derived
//! aggregate state. Records live in a keyed map behind an async `RwLock`;
//! consumers get explicit clone-out snapshots rather than references, so the
//! store carries no dependency on any UI reactivity model.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::conversion::ComplexityAnalyzer;
use crate::types::{BatchStats, ComplexityMetrics, FileId, FileRecord, SourceFile, Status};

/// Check whether an uploaded file is accepted for conversion
///
/// A file is convertible when its name ends in `.html`/`.htm` (ASCII
/// case-insensitive) or its declared media type contains an HTML indicator.
/// Anything else is silently skipped at registration — a deliberate filter,
/// not a failure path.
pub fn is_convertible(name: &str, media_type: Option<&str>) -> bool {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return true;
    }
    media_type
        .map(|m| m.to_ascii_lowercase().contains("html"))
        .unwrap_or(false)
}

/// Keyed collection of per-file processing state
///
/// Cloneable — all state is Arc-wrapped and shared between clones, the same
/// way the processor itself is shared across tasks.
#[derive(Clone)]
pub struct FileStore {
    /// Records keyed by id
    records: Arc<RwLock<HashMap<FileId, FileRecord>>>,
    /// Monotonic id counter; ids are never reused after removal
    next_id: Arc<AtomicI64>,
    /// Analyzer used to compute complexity metrics at registration
    analyzer: Arc<dyn ComplexityAnalyzer>,
}

impl FileStore {
    /// Create an empty store using the given analyzer for registration metrics
    pub fn new(analyzer: Arc<dyn ComplexityAnalyzer>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            analyzer,
        }
    }

    /// Register an uploaded file
    ///
    /// Returns the new pending record, or `None` when the file is not an
    /// accepted type (see [`is_convertible`]). Complexity metrics are
    /// computed here, once, and never updated.
    pub async fn register(&self, file: SourceFile) -> Option<FileRecord> {
        if !is_convertible(&file.name, file.media_type.as_deref()) {
            debug!(name = %file.name, media_type = ?file.media_type, "skipping non-HTML file");
            return None;
        }

        let report = self.analyzer.analyze(&file.content);
        let id = FileId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = FileRecord {
            id,
            name: file.name,
            size_bytes: file.content.len() as u64,
            complexity: ComplexityMetrics::derive(&file.content, &report),
            original_content: file.content,
            converted_content: String::new(),
            status: Status::Pending,
            error: None,
            created_at: Utc::now(),
        };

        let mut records = self.records.write().await;
        records.insert(id, record.clone());
        Some(record)
    }

    /// Get a snapshot of one record
    pub async fn get(&self, id: FileId) -> Option<FileRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Remove a record; returns false if it was absent
    pub async fn remove(&self, id: FileId) -> bool {
        self.records.write().await.remove(&id).is_some()
    }

    /// Remove every record
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Number of registered records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of all records, ordered by id
    pub async fn list(&self) -> Vec<FileRecord> {
        let records = self.records.read().await;
        let mut all: Vec<FileRecord> = records.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        all
    }

    /// Compute aggregate batch state in one consistent pass
    ///
    /// The read lock is held for the whole pass, so counts are never
    /// interleaved with a concurrent status transition.
    pub async fn stats(&self) -> BatchStats {
        let records = self.records.read().await;
        let mut stats = BatchStats {
            total: records.len(),
            ..Default::default()
        };

        for record in records.values() {
            match record.status {
                Status::Pending => stats.pending += 1,
                Status::Processing => stats.processing += 1,
                Status::Completed => stats.completed += 1,
                Status::Error => stats.failed += 1,
            }
        }

        if stats.total > 0 {
            stats.progress = stats.completed as f32 / stats.total as f32 * 100.0;
        }

        stats
    }

    /// Ids eligible for a processing pass, ordered by id
    ///
    /// Pending records are always eligible; failed records join the set when
    /// `include_failed` is on (the `auto_retry` path).
    pub(crate) async fn eligible_ids(&self, include_failed: bool) -> Vec<FileId> {
        let records = self.records.read().await;
        let mut ids: Vec<FileId> = records
            .values()
            .filter(|r| {
                r.status == Status::Pending || (include_failed && r.status == Status::Error)
            })
            .map(|r| r.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Transition a record to `Processing` and hand back what the conversion
    /// task needs. Clears any previous error (the retry path re-enters here).
    ///
    /// Returns `None` when the record disappeared between selection and
    /// dispatch.
    pub(crate) async fn begin_processing(&self, id: FileId) -> Option<(String, String)> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id)?;
        record.status = Status::Processing;
        record.error = None;
        Some((record.name.clone(), record.original_content.clone()))
    }

    /// Transition a record to `Completed` with its converted content
    pub(crate) async fn complete(&self, id: FileId, markdown: String) -> Option<FileRecord> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id)?;
        record.status = Status::Completed;
        record.converted_content = markdown;
        record.error = None;
        Some(record.clone())
    }

    /// Transition a record to `Error` with the failure message
    pub(crate) async fn fail(&self, id: FileId, message: &str) -> Option<FileRecord> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id)?;
        record.status = Status::Error;
        record.converted_content = String::new();
        record.error = Some(message.to_string());
        Some(record.clone())
    }

    /// Reset every failed record to `Pending`, clearing its error
    ///
    /// Returns the number of records reset.
    pub(crate) async fn reset_failed(&self) -> usize {
        let mut records = self.records.write().await;
        let mut reset = 0;
        for record in records.values_mut() {
            if record.status == Status::Error {
                record.status = Status::Pending;
                record.error = None;
                reset += 1;
            }
        }
        reset
    }
}
