use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::config::NamingConvention;
use crate::error::{Error, ExportError, Result};
use crate::export::{
    ArchiveEntry, ArchiveWriter, ExportStats, Exporter, FileSaver, FsFileSaver, ZipArchiveWriter,
    export_file_name, export_stats,
};
use crate::types::{ComplexityMetrics, FileId, FileRecord, Status};

fn record(id: i64, name: &str, status: Status) -> FileRecord {
    FileRecord {
        id: FileId(id),
        name: name.to_string(),
        original_content: "<p>source</p>".to_string(),
        converted_content: String::new(),
        status,
        error: None,
        size_bytes: 13,
        complexity: ComplexityMetrics::default(),
        created_at: Utc::now(),
    }
}

fn completed(id: i64, name: &str, markdown: &str) -> FileRecord {
    FileRecord {
        converted_content: markdown.to_string(),
        ..record(id, name, Status::Completed)
    }
}

fn failed(id: i64, name: &str) -> FileRecord {
    FileRecord {
        error: Some("conversion failed".to_string()),
        ..record(id, name, Status::Error)
    }
}

/// Saver that records every call instead of touching the filesystem.
#[derive(Clone, Default)]
struct RecordingSaver {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl FileSaver for RecordingSaver {
    async fn save(&self, content: &str, filename: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((filename.to_string(), content.to_string()));
        Ok(())
    }
}

/// Saver that always fails.
struct FailingSaver;

#[async_trait]
impl FileSaver for FailingSaver {
    async fn save(&self, _content: &str, filename: &str) -> Result<()> {
        Err(ExportError::SaveFailed {
            name: filename.to_string(),
            reason: "disk full".to_string(),
        }
        .into())
    }
}

/// Archive writer that always fails with a raw cause.
struct FailingWriter;

#[async_trait]
impl ArchiveWriter for FailingWriter {
    async fn create_archive(&self, _entries: Vec<ArchiveEntry>) -> Result<Vec<u8>> {
        Err(Error::Other("deflate exploded".to_string()))
    }
}

fn zip_names(bytes: &[u8]) -> Vec<String> {
    // by_index preserves write order; file_names() does not guarantee it
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn zip_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

// --- export_file_name() ---

#[test]
fn test_original_naming_replaces_html_extension() {
    assert_eq!(
        export_file_name("report.html", NamingConvention::Original, 0),
        "report.md"
    );
    assert_eq!(
        export_file_name("index.htm", NamingConvention::Original, 9),
        "index.md"
    );
}

#[test]
fn test_naming_is_case_insensitive_on_extension() {
    assert_eq!(
        export_file_name("REPORT.HTML", NamingConvention::Original, 0),
        "REPORT.md",
        "base name case must be preserved, extension match must not be"
    );
}

#[test]
fn test_indexed_naming_zero_pads_to_three_digits() {
    assert_eq!(
        export_file_name("report.html", NamingConvention::Indexed, 0),
        "report_000.md"
    );
    assert_eq!(
        export_file_name("report.html", NamingConvention::Indexed, 42),
        "report_042.md"
    );
    assert_eq!(
        export_file_name("report.html", NamingConvention::Indexed, 1234),
        "report_1234.md",
        "indexes beyond three digits must not be truncated"
    );
}

#[test]
fn test_timestamp_naming_matches_pattern() {
    let name = export_file_name("report.html", NamingConvention::Timestamp, 0);
    let pattern = regex::Regex::new(r"^report_\d{14}\.md$").unwrap();
    assert!(
        pattern.is_match(&name),
        "timestamp name must match base_YYYYMMDDHHMMSS.md, got: {name}"
    );
}

#[test]
fn test_name_without_html_extension_gets_md_appended() {
    assert_eq!(
        export_file_name("fragment", NamingConvention::Original, 0),
        "fragment.md"
    );
    assert_eq!(
        export_file_name("notes.txt", NamingConvention::Original, 0),
        "notes.txt.md",
        "only HTML extensions are replaced"
    );
}

// --- export_all() / export_selected() ---

#[tokio::test]
async fn test_export_all_includes_only_completed_records() {
    let exporter = Exporter::new(Arc::new(RecordingSaver::default()));
    let records = vec![
        completed(1, "a.html", "# A"),
        failed(2, "broken.html"),
        record(3, "pending.html", Status::Pending),
        completed(4, "b.html", "# B"),
    ];

    let bytes = exporter
        .export_all(&records, NamingConvention::Original)
        .await
        .unwrap();

    let names = zip_names(&bytes);
    assert_eq!(names, vec!["a.md", "b.md"]);
    assert_eq!(zip_entry(&bytes, "a.md"), "# A");
    assert_eq!(zip_entry(&bytes, "b.md"), "# B");
}

#[tokio::test]
async fn test_export_all_indexed_runs_over_exported_sequence() {
    let exporter = Exporter::new(Arc::new(RecordingSaver::default()));
    let records = vec![
        completed(1, "a.html", "# A"),
        failed(2, "broken.html"),
        completed(3, "b.html", "# B"),
    ];

    let bytes = exporter
        .export_all(&records, NamingConvention::Indexed)
        .await
        .unwrap();

    assert_eq!(
        zip_names(&bytes),
        vec!["a_000.md", "b_001.md"],
        "the failed record must not consume an index"
    );
}

#[tokio::test]
async fn test_export_selected_restricts_to_intersection() {
    let exporter = Exporter::new(Arc::new(RecordingSaver::default()));
    let records = vec![
        completed(1, "a.html", "# A"),
        completed(2, "b.html", "# B"),
        failed(3, "broken.html"),
    ];

    // Selecting a failed record must not resurrect it.
    let bytes = exporter
        .export_selected(
            &records,
            &[FileId(2), FileId(3)],
            NamingConvention::Original,
        )
        .await
        .unwrap();

    assert_eq!(zip_names(&bytes), vec!["b.md"]);
}

#[tokio::test]
async fn test_export_selected_empty_intersection_yields_valid_empty_archive() {
    let exporter = Exporter::new(Arc::new(RecordingSaver::default()));
    let records = vec![completed(1, "a.html", "# A")];

    let bytes = exporter
        .export_selected(&records, &[FileId(99)], NamingConvention::Original)
        .await
        .unwrap();

    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 0, "empty archive must still parse as a ZIP");
}

#[tokio::test]
async fn test_archive_failure_is_wrapped_with_cause() {
    let exporter = Exporter::with_writer(
        Arc::new(FailingWriter),
        Arc::new(RecordingSaver::default()),
    );
    let records = vec![completed(1, "a.html", "# A")];

    let err = exporter
        .export_all(&records, NamingConvention::Original)
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(
        msg.contains("failed to create archive"),
        "writer failures must wrap into the descriptive export error, got: {msg}"
    );
    assert!(msg.contains("deflate exploded"), "cause must be carried, got: {msg}");
}

// --- save_individually() ---

#[tokio::test]
async fn test_save_individually_saves_completed_records_in_order() {
    let saver = RecordingSaver::default();
    let exporter = Exporter::new(Arc::new(saver.clone()));
    let records = vec![
        completed(1, "a.html", "# A"),
        failed(2, "broken.html"),
        completed(3, "b.html", "# B"),
    ];

    let saved = exporter
        .save_individually(&records, NamingConvention::Original)
        .await
        .unwrap();

    assert_eq!(saved, 2);
    let calls = saver.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            ("a.md".to_string(), "# A".to_string()),
            ("b.md".to_string(), "# B".to_string()),
        ],
        "one save per completed record, in record order"
    );
}

#[tokio::test]
async fn test_save_individually_with_no_completed_records_saves_nothing() {
    let saver = RecordingSaver::default();
    let exporter = Exporter::new(Arc::new(saver.clone()));
    let records = vec![failed(1, "broken.html")];

    let saved = exporter
        .save_individually(&records, NamingConvention::Original)
        .await
        .unwrap();

    assert_eq!(saved, 0);
    assert!(saver.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_failure_propagates_directly() {
    let exporter = Exporter::new(Arc::new(FailingSaver));
    let records = vec![completed(1, "a.html", "# A")];

    let err = exporter
        .save_individually(&records, NamingConvention::Original)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Export(ExportError::SaveFailed { .. })
    ));
}

// --- FsFileSaver ---

#[tokio::test]
async fn test_fs_file_saver_writes_into_target_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exports");
    let saver = FsFileSaver::new(&target);

    saver.save("# hello", "a.md").await.unwrap();

    let written = std::fs::read_to_string(target.join("a.md")).unwrap();
    assert_eq!(written, "# hello");
}

// --- ZipArchiveWriter ---

#[tokio::test]
async fn test_zip_writer_round_trips_entries() {
    let writer = ZipArchiveWriter::new();
    let bytes = writer
        .create_archive(vec![
            ArchiveEntry {
                name: "one.md".to_string(),
                content: "# One".to_string(),
            },
            ArchiveEntry {
                name: "two.md".to_string(),
                content: "# Two".to_string(),
            },
        ])
        .await
        .unwrap();

    assert_eq!(zip_names(&bytes), vec!["one.md", "two.md"]);
    assert_eq!(zip_entry(&bytes, "two.md"), "# Two");
}

// --- export_stats() ---

#[test]
fn test_export_stats_aggregates_counts_and_sizes() {
    let records = vec![
        completed(1, "a.html", "12345"),
        completed(2, "b.html", "abc"),
        failed(3, "broken.html"),
        record(4, "pending.html", Status::Pending),
    ];

    let stats = export_stats(&records);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.original_bytes, 13 * 4);
    assert_eq!(stats.converted_chars, 8);
}

#[test]
fn test_export_stats_of_empty_set_is_all_zero() {
    assert_eq!(export_stats(&[]), ExportStats::default());
}
