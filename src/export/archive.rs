//! Archive writer seam and the shipped ZIP implementation.

use std::io::{Cursor, Write};

use async_trait::async_trait;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::{Error, Result};

/// One named entry destined for an archive
#[derive(Clone, Debug)]
pub struct ArchiveEntry {
    /// Entry filename inside the archive
    pub name: String,
    /// Entry content
    pub content: String,
}

/// Archive creation capability
///
/// Implementations return the raw failure cause on error; the
/// [`Exporter`](super::Exporter) owns wrapping it into the single
/// descriptive export error.
#[async_trait]
pub trait ArchiveWriter: Send + Sync {
    /// Compress the given entries into an archive and return its bytes
    ///
    /// Zero entries must produce a valid empty archive, not an error.
    async fn create_archive(&self, entries: Vec<ArchiveEntry>) -> Result<Vec<u8>>;
}

/// ZIP archive writer using deflate compression
///
/// Compression is CPU-bound, so it runs under `spawn_blocking` to keep
/// runtime worker threads free.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipArchiveWriter;

impl ZipArchiveWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveWriter for ZipArchiveWriter {
    async fn create_archive(&self, entries: Vec<ArchiveEntry>) -> Result<Vec<u8>> {
        let entry_count = entries.len();
        debug!(entries = entry_count, "creating ZIP archive");

        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

            for entry in entries {
                let options =
                    FileOptions::default().compression_method(CompressionMethod::Deflated);
                writer
                    .start_file(entry.name.as_str(), options)
                    .map_err(|e| Error::Other(format!("ZIP entry '{}': {}", entry.name, e)))?;
                writer.write_all(entry.content.as_bytes())?;
            }

            let cursor = writer
                .finish()
                .map_err(|e| Error::Other(format!("ZIP finalize: {e}")))?;
            Ok(cursor.into_inner())
        })
        .await
        .map_err(|e| Error::Other(format!("archive task failed: {e}")))??;

        info!(
            entries = entry_count,
            archive_bytes = bytes.len(),
            "ZIP archive created"
        );

        Ok(bytes)
    }
}
