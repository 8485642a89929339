//! Export coordination — archives, individual saves, naming, statistics.
//!
//! Turns completed [`FileRecord`]s into downloadable artifacts. Archive
//! creation and file saving are host capabilities behind the
//! [`ArchiveWriter`] and [`FileSaver`] seams; this module selects and names
//! the entries and owns the error wrapping.

mod archive;
mod saver;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use archive::{ArchiveEntry, ArchiveWriter, ZipArchiveWriter};
pub use saver::{FileSaver, FsFileSaver};

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::NamingConvention;
use crate::error::{ExportError, Result};
use crate::types::{FileId, FileRecord, Status};

/// Delay between successive individual saves.
///
/// Host environments tend to block rapid successive download triggers, so
/// saves are staggered. Environmental workaround, not a correctness
/// requirement.
const SAVE_STAGGER: Duration = Duration::from_millis(50);

/// Derive an export filename from an original filename
///
/// A trailing `.html`/`.htm` (ASCII case-insensitive) is replaced with
/// `.md`; names without an HTML extension get `.md` appended. `Timestamp`
/// appends the current UTC time to the base name, `Indexed` appends a
/// zero-padded 3-digit index, `Original` leaves the base unchanged.
///
/// Pure and deterministic given its inputs, aside from the inherently
/// time-dependent `Timestamp` case.
///
/// # Examples
///
/// ```
/// use html2md_batch::{NamingConvention, export_file_name};
///
/// assert_eq!(
///     export_file_name("report.html", NamingConvention::Original, 0),
///     "report.md"
/// );
/// assert_eq!(
///     export_file_name("report.html", NamingConvention::Indexed, 0),
///     "report_000.md"
/// );
/// ```
pub fn export_file_name(original: &str, naming: NamingConvention, index: usize) -> String {
    let base = strip_html_extension(original);
    match naming {
        NamingConvention::Original => format!("{base}.md"),
        NamingConvention::Timestamp => {
            format!("{base}_{}.md", Utc::now().format("%Y%m%d%H%M%S"))
        }
        NamingConvention::Indexed => format!("{base}_{index:03}.md"),
    }
}

/// Strip a trailing `.html`/`.htm` extension, case-insensitively
fn strip_html_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".html") {
        &name[..name.len() - 5]
    } else if lower.ends_with(".htm") {
        &name[..name.len() - 4]
    } else {
        name
    }
}

/// Aggregate export statistics over a set of records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    /// Total number of records
    pub total: usize,

    /// Number of completed records (exportable)
    pub completed: usize,

    /// Number of failed records
    pub failed: usize,

    /// Total byte size of original content across all records
    pub original_bytes: u64,

    /// Total character count of converted content across completed records
    pub converted_chars: usize,
}

/// Compute export statistics — pure aggregation, no side effects
pub fn export_stats(records: &[FileRecord]) -> ExportStats {
    let mut stats = ExportStats {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        stats.original_bytes += record.size_bytes;
        match record.status {
            Status::Completed => {
                stats.completed += 1;
                stats.converted_chars += record.converted_content.chars().count();
            }
            Status::Error => stats.failed += 1,
            _ => {}
        }
    }

    stats
}

/// Coordinates export of completed records into downloadable artifacts
#[derive(Clone)]
pub struct Exporter {
    /// Archive creation capability
    writer: Arc<dyn ArchiveWriter>,
    /// File save capability
    saver: Arc<dyn FileSaver>,
}

impl Exporter {
    /// Create an exporter with the shipped ZIP archive writer
    pub fn new(saver: Arc<dyn FileSaver>) -> Self {
        Self::with_writer(Arc::new(ZipArchiveWriter::new()), saver)
    }

    /// Create an exporter with an explicit archive writer implementation
    pub fn with_writer(writer: Arc<dyn ArchiveWriter>, saver: Arc<dyn FileSaver>) -> Self {
        Self { writer, saver }
    }

    /// Build a compressed archive of every completed record
    ///
    /// Records that are not `Completed` are silently excluded. Entry names
    /// come from [`export_file_name`]; under `Indexed` naming the index runs
    /// over the exported sequence, not the full record set.
    ///
    /// # Errors
    ///
    /// Any archive writer failure is wrapped into a single
    /// [`ExportError::ArchiveFailed`] carrying the cause; no partial archive
    /// is returned.
    pub async fn export_all(
        &self,
        records: &[FileRecord],
        naming: NamingConvention,
    ) -> Result<Vec<u8>> {
        let completed: Vec<&FileRecord> = records
            .iter()
            .filter(|r| r.status == Status::Completed)
            .collect();
        self.build_archive(&completed, naming).await
    }

    /// Build a compressed archive of the selected completed records
    ///
    /// Same as [`export_all`](Self::export_all), restricted to the
    /// intersection of completed records and `selected`. An empty
    /// intersection yields an empty (but valid) archive.
    pub async fn export_selected(
        &self,
        records: &[FileRecord],
        selected: &[FileId],
        naming: NamingConvention,
    ) -> Result<Vec<u8>> {
        let completed: Vec<&FileRecord> = records
            .iter()
            .filter(|r| r.status == Status::Completed && selected.contains(&r.id))
            .collect();
        self.build_archive(&completed, naming).await
    }

    async fn build_archive(
        &self,
        completed: &[&FileRecord],
        naming: NamingConvention,
    ) -> Result<Vec<u8>> {
        let entries: Vec<ArchiveEntry> = completed
            .iter()
            .enumerate()
            .map(|(index, record)| ArchiveEntry {
                name: export_file_name(&record.name, naming, index),
                content: record.converted_content.clone(),
            })
            .collect();

        debug!(entries = entries.len(), "building export archive");

        self.writer.create_archive(entries).await.map_err(|e| {
            ExportError::ArchiveFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Save each completed record as its own file
    ///
    /// Saves happen in record order, staggered by a short delay so the host
    /// environment doesn't block rapid successive downloads. Records that
    /// are not `Completed` are skipped. Returns the number of saves.
    ///
    /// # Errors
    ///
    /// The first save failure propagates directly — there is no
    /// partial-archive state to protect.
    pub async fn save_individually(
        &self,
        records: &[FileRecord],
        naming: NamingConvention,
    ) -> Result<usize> {
        let completed: Vec<&FileRecord> = records
            .iter()
            .filter(|r| r.status == Status::Completed)
            .collect();

        for (index, record) in completed.iter().enumerate() {
            let filename = export_file_name(&record.name, naming, index);
            self.saver
                .save(&record.converted_content, &filename)
                .await?;

            if index + 1 < completed.len() {
                tokio::time::sleep(SAVE_STAGGER).await;
            }
        }

        info!(saved = completed.len(), "individual export complete");
        Ok(completed.len())
    }
}
