//! Core batch processor implementation split into focused submodules.
//!
//! The `BatchProcessor` struct and its methods are organized by domain:
//! - [`ingest`] - File validation and registration
//! - [`run`] - Windowed processing pass execution
//! - [`control`] - Retry, removal, and runtime configuration updates

mod control;
mod ingest;
mod run;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::BatchConfig;
use crate::conversion::{
    ComplexityAnalyzer, HtmlConverter, RegexSanitizer, Sanitizer, TagScanAnalyzer,
};
use crate::store::FileStore;
use crate::types::Event;

/// Capacity of the event broadcast channel
///
/// Subscribers that fall more than this many events behind receive a
/// `RecvError::Lagged` rather than stalling the pipeline.
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Batch conversion orchestrator (cloneable - all state is Arc-wrapped)
///
/// Drives conversion of registered files with bounded concurrency, isolates
/// per-file failures, supports retry, and reports lifecycle events over a
/// broadcast channel. Instantiate one per batch context — there is no
/// process-wide state, so independent batches run in full isolation.
#[derive(Clone)]
pub struct BatchProcessor {
    /// Authoritative record store
    pub(crate) store: FileStore,
    /// Runtime-mutable configuration (replaceable between runs)
    pub(crate) config: Arc<tokio::sync::RwLock<BatchConfig>>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Conversion engine
    pub(crate) converter: Arc<dyn HtmlConverter>,
    /// Pre-conversion cleaner
    pub(crate) sanitizer: Arc<dyn Sanitizer>,
    /// Re-entrancy guard — at most one processing pass at a time
    pub(crate) in_flight: Arc<AtomicBool>,
}

impl BatchProcessor {
    /// Create a processor with the shipped sanitizer and analyzer
    ///
    /// The conversion engine is always caller-supplied — the pipeline treats
    /// it as an external collaborator.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use html2md_batch::{BatchConfig, BatchProcessor, ConvertOptions, FnConverter};
    ///
    /// let converter = Arc::new(FnConverter::new(|html: &str, _: &ConvertOptions| {
    ///     Ok(html.to_string())
    /// }));
    /// let processor = BatchProcessor::new(BatchConfig::default(), converter);
    /// ```
    pub fn new(config: BatchConfig, converter: Arc<dyn HtmlConverter>) -> Self {
        Self::with_collaborators(
            config,
            converter,
            Arc::new(RegexSanitizer::new()),
            Arc::new(TagScanAnalyzer::new()),
        )
    }

    /// Create a processor with explicit sanitizer and analyzer implementations
    pub fn with_collaborators(
        config: BatchConfig,
        converter: Arc<dyn HtmlConverter>,
        sanitizer: Arc<dyn Sanitizer>,
        analyzer: Arc<dyn ComplexityAnalyzer>,
    ) -> Self {
        let (event_tx, _rx) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            store: FileStore::new(analyzer),
            config: Arc::new(tokio::sync::RwLock::new(config.normalized())),
            event_tx,
            converter,
            sanitizer,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to batch lifecycle events
    ///
    /// Multiple subscribers are supported. Each subscriber receives all
    /// events independently, in emission order. Events are buffered; a
    /// subscriber that falls behind by more than the channel capacity
    /// receives a `RecvError::Lagged` error.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Whether a processing pass is currently in flight
    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Emit an event to all subscribers
    ///
    /// If there are no active subscribers, the event is silently dropped
    /// (ok() converts Err to None). Processing continues even if no one is
    /// listening.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
