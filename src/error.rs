//! Error types for html2md-batch
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Batch, Convert, Export)
//! - Context information (file name, failure reason)
//!
//! Per-record conversion failures are normally recovered locally — they are
//! recorded on the [`FileRecord`](crate::types::FileRecord) and surfaced via
//! events rather than returned as errors. The types here cover the paths that
//! do propagate: batch aborts, export failures, and I/O.

use thiserror::Error;

/// Result type alias for html2md-batch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for html2md-batch
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Batch orchestration error
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// Conversion error
    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Export or archive error
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Batch orchestration errors
#[derive(Debug, Error)]
pub enum BatchError {
    /// A record failed while `stop_on_error` was set, aborting the remaining windows
    #[error("batch aborted on '{name}': {error}")]
    Aborted {
        /// Name of the file whose failure triggered the abort
        name: String,
        /// The conversion error message
        error: String,
    },

    /// A conversion task panicked or was cancelled by the runtime
    #[error("conversion task failed: {reason}")]
    TaskFailed {
        /// Description of the task failure
        reason: String,
    },
}

/// Errors produced by an [`HtmlConverter`](crate::conversion::HtmlConverter) implementation
///
/// Converter implementations construct these directly. The batch processor
/// records the message on the failing record and carries on with the rest of
/// the batch.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input HTML could not be parsed or converted
    #[error("malformed HTML: {0}")]
    Malformed(String),

    /// Any other converter-internal failure
    #[error("{0}")]
    Other(String),
}

/// Export and archive errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Archive creation failed (compression step or writer internals)
    #[error("failed to create archive: {reason}")]
    ArchiveFailed {
        /// The underlying cause
        reason: String,
    },

    /// An individual file save failed
    #[error("failed to save '{name}': {reason}")]
    SaveFailed {
        /// The filename that could not be saved
        name: String,
        /// The underlying cause
        reason: String,
    },
}
