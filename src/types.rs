//! Core types for html2md-batch

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a registered file
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub i64);

impl FileId {
    /// Create a new FileId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for FileId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<FileId> for i64 {
    fn from(id: FileId) -> Self {
        id.0
    }
}

impl PartialEq<i64> for FileId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<FileId> for i64 {
    fn eq(&self, other: &FileId) -> bool {
        *self == other.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FileId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Processing status of a registered file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Registered and waiting for a processing pass
    Pending,
    /// Selected for the current concurrency window, conversion in flight
    Processing,
    /// Conversion succeeded, converted content available
    Completed,
    /// Conversion failed, error message recorded
    Error,
}

impl Status {
    /// Whether the record has reached a terminal state for the current pass
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Error)
    }
}

/// Raw analysis of an HTML document produced by a
/// [`ComplexityAnalyzer`](crate::conversion::ComplexityAnalyzer)
///
/// Analyzers are best-effort: for empty or unparseable input every field is
/// zero/false rather than an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityReport {
    /// Number of element open tags
    pub element_count: usize,

    /// Maximum element nesting depth
    pub depth: usize,

    /// Whether the document contains tables
    pub has_tables: bool,

    /// Whether the document contains ordered or unordered lists
    pub has_lists: bool,

    /// Whether the document contains code blocks or inline code
    pub has_code: bool,
}

/// Element count above which a document is flagged complex
const COMPLEX_ELEMENT_THRESHOLD: usize = 100;

/// Nesting depth above which a document is flagged complex
const COMPLEX_DEPTH_THRESHOLD: usize = 12;

/// Derived complexity summary stored on each [`FileRecord`]
///
/// Computed once at registration and never updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Character count of the original content
    pub char_count: usize,

    /// Number of element open tags
    pub element_count: usize,

    /// Whether the document is considered complex (large, deeply nested,
    /// or containing structures that convert lossily such as tables or code)
    pub is_complex: bool,
}

impl ComplexityMetrics {
    /// Derive metrics from raw content and its analyzer report
    pub fn derive(content: &str, report: &ComplexityReport) -> Self {
        Self {
            char_count: content.chars().count(),
            element_count: report.element_count,
            is_complex: report.element_count > COMPLEX_ELEMENT_THRESHOLD
                || report.depth > COMPLEX_DEPTH_THRESHOLD
                || report.has_tables
                || report.has_code,
        }
    }
}

/// An uploaded file presented for registration
///
/// Content arrives as in-memory text already decoded from the host
/// environment's file objects; there is no file-system ingestion path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFile {
    /// Original filename, including extension
    pub name: String,

    /// Raw source text
    pub content: String,

    /// Declared media type, if the host environment provided one
    #[serde(default)]
    pub media_type: Option<String>,
}

impl SourceFile {
    /// Convenience constructor for a file with no declared media type
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            media_type: None,
        }
    }
}

/// Per-file processing state
///
/// One record exists per registered file. Records are created by
/// registration, mutated only by processing passes or explicit
/// removal/clear, and destroyed by removal or batch clear.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique identifier, assigned at registration
    pub id: FileId,

    /// Original filename
    pub name: String,

    /// Raw source text, immutable after registration
    pub original_content: String,

    /// Converted output; empty until status reaches `Completed`
    pub converted_content: String,

    /// Current processing status
    pub status: Status,

    /// Error message, set only when `status == Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Byte length of the original content
    pub size_bytes: u64,

    /// Complexity summary computed at registration
    pub complexity: ComplexityMetrics,

    /// When the file was registered
    pub created_at: DateTime<Utc>,
}

/// Aggregate batch state derived from all records
///
/// Never stored — computed on demand in one consistent pass over the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Total number of registered files
    pub total: usize,

    /// Number of files waiting for a processing pass
    pub pending: usize,

    /// Number of files currently being converted
    pub processing: usize,

    /// Number of successfully converted files
    pub completed: usize,

    /// Number of files whose conversion failed
    pub failed: usize,

    /// Overall progress percentage (0.0 to 100.0; 0.0 when total is 0)
    pub progress: f32,
}

/// Event emitted during batch lifecycle
///
/// Events are broadcast to all subscribers in emission order. Emission for a
/// given file always follows that file's own status transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A file passed validation and was registered as pending
    FileAdded {
        /// File ID
        id: FileId,
        /// Original filename
        name: String,
    },

    /// A file was removed from the store
    FileRemoved {
        /// File ID
        id: FileId,
    },

    /// A file was converted successfully
    FileProcessed {
        /// File ID
        id: FileId,
        /// Original filename
        name: String,
    },

    /// A file's conversion failed
    FileFailed {
        /// File ID
        id: FileId,
        /// Original filename
        name: String,
        /// Error message recorded on the file
        error: String,
    },

    /// Aggregate progress after a concurrency window completed
    ProgressUpdate {
        /// Progress percentage (0.0 to 100.0)
        percent: f32,
    },

    /// A processing pass finished normally
    ProcessingComplete,

    /// A processing pass aborted with an orchestration failure
    ProcessingError {
        /// Error message
        error: String,
    },
}
