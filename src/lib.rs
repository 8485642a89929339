//! # html2md-batch
//!
//! Concurrency-limited batch HTML to Markdown conversion pipeline.
//!
//! ## Design Philosophy
//!
//! html2md-batch is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Pluggable** - The conversion engine, sanitizer, analyzer, archive
//!   writer, and file saver are trait seams with shipped defaults
//! - **Isolated** - Per-file failures never take down the batch; everything
//!   is instantiated per use with no process-wide state
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use html2md_batch::{
//!     BatchConfig, BatchProcessor, ConvertOptions, FnConverter, SourceFile,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Plug in any HTML-to-Markdown engine.
//!     let converter = Arc::new(FnConverter::new(|html: &str, _: &ConvertOptions| {
//!         Ok(html.to_string())
//!     }));
//!
//!     let processor = BatchProcessor::new(BatchConfig::default(), converter);
//!
//!     // Subscribe to events
//!     let mut events = processor.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     processor
//!         .add_files(vec![SourceFile::new("a.html", "<h1>Hello</h1>")])
//!         .await;
//!     processor.process_all().await?;
//!
//!     println!("progress: {}%", processor.stats().await.progress);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Conversion seams (converter, sanitizer, analyzer)
pub mod conversion;
/// Error types
pub mod error;
/// Export and archive coordination
pub mod export;
/// Core batch processor (decomposed into focused submodules)
pub mod processor;
/// In-memory file record store
pub mod store;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{BatchConfig, CodeBlockStyle, ConvertOptions, HeadingStyle, NamingConvention};
pub use conversion::{
    ComplexityAnalyzer, FnConverter, HtmlConverter, RegexSanitizer, Sanitizer, TagScanAnalyzer,
};
pub use error::{BatchError, ConvertError, Error, ExportError, Result};
pub use export::{
    ArchiveEntry, ArchiveWriter, ExportStats, Exporter, FileSaver, FsFileSaver, ZipArchiveWriter,
    export_file_name, export_stats,
};
pub use processor::BatchProcessor;
pub use store::{FileStore, is_convertible};
pub use types::{
    BatchStats, ComplexityMetrics, ComplexityReport, Event, FileId, FileRecord, SourceFile, Status,
};
