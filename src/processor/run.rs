//! Windowed processing pass execution.
//!
//! A pass partitions the eligible records into consecutive windows of
//! `max_concurrent` and drives each window to completion before starting the
//! next. Within a window conversions run concurrently and may finish in any
//! order; windows themselves are strictly sequential, which is what bounds
//! the number of in-flight conversions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::config::BatchConfig;
use crate::error::{BatchError, ConvertError, Error, Result};
use crate::types::{Event, FileId};

use super::BatchProcessor;

/// Clears the in-flight flag on every exit path, including panics
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Outcome of one record's conversion attempt, as seen by the window loop
///
/// Failures are already recorded on the store and surfaced via events by the
/// time this is returned; the window loop only inspects it for the
/// `stop_on_error` abort decision.
enum RecordOutcome {
    Ok,
    Failed { name: String, error: String },
}

impl BatchProcessor {
    /// Run one processing pass over all eligible records
    ///
    /// Eligible records are those with status `Pending`, plus `Error`
    /// records when `auto_retry` is enabled. The pass:
    ///
    /// - returns immediately without effect if another pass is in flight
    ///   (at most one active pass per processor);
    /// - with an empty eligible set, emits one progress update and one
    ///   `ProcessingComplete` and returns Ok — a defined no-op;
    /// - otherwise processes the eligible set in consecutive windows of
    ///   `max_concurrent`, emitting a `ProgressUpdate` after each window;
    /// - isolates per-record failures: a failed conversion marks that record
    ///   `Error` and emits `FileFailed`, but the pass continues — unless
    ///   `stop_on_error` is set, in which case no further window starts,
    ///   untouched records stay `Pending`, a `ProcessingError` is emitted
    ///   and the abort is returned as `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Aborted`] when `stop_on_error` cut the pass
    /// short. Per-record failures without `stop_on_error` are not errors.
    pub async fn process_all(&self) -> Result<()> {
        // Re-entrancy guard: swap returns the previous value, so a second
        // caller sees true and backs out without touching anything.
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("processing pass already in flight, ignoring process_all");
            return Ok(());
        }
        let _guard = InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        };

        let config = self.config.read().await.clone();
        let eligible = self.store.eligible_ids(config.auto_retry).await;

        if eligible.is_empty() {
            let stats = self.store.stats().await;
            self.emit_event(Event::ProgressUpdate {
                percent: stats.progress,
            });
            self.emit_event(Event::ProcessingComplete);
            debug!("no eligible files, completing immediately");
            return Ok(());
        }

        info!(
            eligible = eligible.len(),
            max_concurrent = config.max_concurrent,
            auto_retry = config.auto_retry,
            "starting processing pass"
        );

        match self.run_windows(&eligible, &config).await {
            Ok(()) => {
                info!("processing pass complete");
                self.emit_event(Event::ProcessingComplete);
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                error!(error = %message, "processing pass aborted");
                self.emit_event(Event::ProcessingError { error: message });
                Err(e)
            }
        }
    }

    /// Drive consecutive windows over the eligible ids
    ///
    /// All records of window N reach a terminal status before any record of
    /// window N+1 begins.
    async fn run_windows(&self, eligible: &[FileId], config: &BatchConfig) -> Result<()> {
        let window_size = config.max_concurrent.max(1);

        for window in eligible.chunks(window_size) {
            let outcomes = futures::future::join_all(
                window.iter().map(|id| self.convert_record(*id, config)),
            )
            .await;

            // Progress reflects the fully-settled window before any abort
            // decision is taken.
            let stats = self.store.stats().await;
            self.emit_event(Event::ProgressUpdate {
                percent: stats.progress,
            });

            if config.stop_on_error {
                let first_failure = outcomes.into_iter().find_map(|o| match o {
                    RecordOutcome::Failed { name, error } => Some((name, error)),
                    RecordOutcome::Ok => None,
                });
                if let Some((name, error)) = first_failure {
                    return Err(Error::Batch(BatchError::Aborted { name, error }));
                }
            }
        }

        Ok(())
    }

    /// Convert a single record: sanitize, convert off-runtime, record the outcome
    ///
    /// The sanitize + convert step is CPU-bound, so it runs under
    /// `spawn_blocking` to keep runtime worker threads free for the rest of
    /// the window. A panicking converter is demoted to a per-record failure
    /// rather than poisoning the whole pass.
    async fn convert_record(&self, id: FileId, config: &BatchConfig) -> RecordOutcome {
        let Some((name, content)) = self.store.begin_processing(id).await else {
            // Removed between selection and dispatch; nothing to do.
            warn!(file_id = id.get(), "record disappeared before processing");
            return RecordOutcome::Ok;
        };

        let sanitizer = Arc::clone(&self.sanitizer);
        let converter = Arc::clone(&self.converter);
        let options = config.convert.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            let cleaned = sanitizer.sanitize(&content);
            converter.convert(&cleaned, &options)
        })
        .await
        .unwrap_or_else(|e| {
            Err(ConvertError::Other(
                BatchError::TaskFailed {
                    reason: e.to_string(),
                }
                .to_string(),
            ))
        });

        match outcome {
            Ok(markdown) => {
                if let Some(record) = self.store.complete(id, markdown).await {
                    debug!(file_id = id.get(), name = %record.name, "file converted");
                    self.emit_event(Event::FileProcessed {
                        id,
                        name: record.name,
                    });
                }
                RecordOutcome::Ok
            }
            Err(e) => {
                let message = e.to_string();
                warn!(file_id = id.get(), name = %name, error = %message, "file conversion failed");
                if let Some(record) = self.store.fail(id, &message).await {
                    self.emit_event(Event::FileFailed {
                        id,
                        name: record.name,
                        error: message.clone(),
                    });
                }
                RecordOutcome::Failed {
                    name,
                    error: message,
                }
            }
        }
    }
}
