//! Shared test helpers for creating BatchProcessor instances in tests.

use std::sync::Arc;

use crate::config::BatchConfig;
use crate::conversion::{FnConverter, HtmlConverter};
use crate::error::ConvertError;
use crate::types::{Event, FileId, SourceFile};

use super::BatchProcessor;

/// Content marker that makes [`test_converter`] fail deterministically.
pub(crate) const FAIL_MARKER: &str = "<!--fail-->";

/// Deterministic converter: fails on [`FAIL_MARKER`], otherwise produces
/// non-empty Markdown derived from the input.
pub(crate) fn test_converter() -> Arc<dyn HtmlConverter> {
    Arc::new(FnConverter::new(|html: &str, _options| {
        if html.contains(FAIL_MARKER) {
            Err(ConvertError::Malformed(
                "injected conversion failure".to_string(),
            ))
        } else {
            Ok(format!("# converted\n\n{html}"))
        }
    }))
}

/// Processor wired with the deterministic test converter.
pub(crate) fn create_test_processor(config: BatchConfig) -> BatchProcessor {
    BatchProcessor::new(config, test_converter())
}

/// Processor wired with a caller-supplied converter.
pub(crate) fn create_test_processor_with(
    config: BatchConfig,
    converter: Arc<dyn HtmlConverter>,
) -> BatchProcessor {
    BatchProcessor::new(config, converter)
}

/// Register one `.html` file per (name, content) pair and return the ids.
pub(crate) async fn add_html(
    processor: &BatchProcessor,
    files: &[(&str, &str)],
) -> Vec<FileId> {
    let sources = files
        .iter()
        .map(|(name, content)| SourceFile::new(*name, *content))
        .collect();
    processor
        .add_files(sources)
        .await
        .into_iter()
        .map(|record| record.id)
        .collect()
}

/// Drain every buffered event from a subscription.
pub(crate) fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Count events matching a predicate.
pub(crate) fn count_matching(events: &[Event], pred: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}
