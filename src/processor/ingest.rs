//! File validation and registration.

use tracing::info;

use crate::types::{Event, FileRecord, SourceFile};

use super::BatchProcessor;

impl BatchProcessor {
    /// Register uploaded files for conversion
    ///
    /// Each file is validated by the store: names ending in `.html`/`.htm`
    /// or media types containing an HTML indicator are accepted, everything
    /// else is silently dropped. A `FileAdded` event is emitted per accepted
    /// file and only the accepted records are returned — callers can diff
    /// input count against the returned count to detect skipped files.
    ///
    /// Must not be called concurrently with an active
    /// [`process_all`](Self::process_all) — the interleaving is undefined
    /// (caller obligation, not locked against).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use html2md_batch::*;
    /// # async fn example(processor: BatchProcessor) {
    /// let registered = processor
    ///     .add_files(vec![
    ///         SourceFile::new("a.html", "<p>one</p>"),
    ///         SourceFile::new("notes.txt", "not html"),
    ///     ])
    ///     .await;
    /// assert_eq!(registered.len(), 1); // notes.txt was silently dropped
    /// # }
    /// ```
    pub async fn add_files(&self, files: Vec<SourceFile>) -> Vec<FileRecord> {
        let presented = files.len();
        let mut accepted = Vec::with_capacity(presented);

        for file in files {
            if let Some(record) = self.store.register(file).await {
                self.emit_event(Event::FileAdded {
                    id: record.id,
                    name: record.name.clone(),
                });
                accepted.push(record);
            }
        }

        info!(
            presented = presented,
            accepted = accepted.len(),
            "registered uploaded files"
        );

        accepted
    }
}
