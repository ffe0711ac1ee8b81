//! The preview synchronizer.
//!
//! Keeps preview targets eventually consistent with the watched fields:
//! every edit restarts a quiet-period timer, and only when it runs out are the
//! fields read and resolved into previews through the page's [`SyncStrategy`].
//!
//! Each sync takes a sequence number when it starts. A result is only written
//! to the targets if no later sync has started in the meantime, so a slow
//! response can never overwrite a newer preview.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::debounce::Debouncer;
use crate::error::{SyncError, SyncResult};
use crate::field::FieldSource;
use crate::report::{Reporter, StderrReporter};
use crate::strategy::SyncStrategy;
use crate::target::PreviewPair;

/// What a single [`Synchronizer::debounced_sync`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Targets now show this sync's previews.
    Applied,
    /// A newer sync started first; the result was dropped.
    Superseded,
    /// The error was reported and targets were left alone.
    Failed,
}

/// Counters over the synchronizer's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub started: u64,
    pub applied: u64,
    pub superseded: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    applied: AtomicU64,
    superseded: AtomicU64,
    failed: AtomicU64,
}

/// Debounced bridge from watched fields to preview targets.
pub struct Synchronizer {
    fields: Arc<dyn FieldSource>,
    field_names: Vec<String>,
    strategy: SyncStrategy,
    targets: Vec<PreviewPair>,
    reporter: Arc<dyn Reporter>,
    debouncer: Debouncer,
    issued: AtomicU64,
    counters: Counters,
}

impl Synchronizer {
    /// Create a synchronizer reading `field_names` from `fields` and writing
    /// the resolved previews to `targets`, one pair per preview surface.
    ///
    /// The debounce interval defaults to the strategy's own (555 ms for URL
    /// previews, 666 ms for request previews).
    pub fn new<I, S>(
        fields: Arc<dyn FieldSource>,
        field_names: I,
        strategy: SyncStrategy,
        targets: Vec<PreviewPair>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let debouncer = Debouncer::new(strategy.default_interval());
        Self {
            fields,
            field_names: field_names.into_iter().map(Into::into).collect(),
            strategy,
            targets,
            reporter: Arc::new(StderrReporter),
            debouncer,
            issued: AtomicU64::new(0),
            counters: Counters::default(),
        }
    }

    /// Set the quiet period that must follow the last edit.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.debouncer = Debouncer::new(interval);
        self
    }

    /// Set where failures are shown to the user.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Start synchronizing: returns the shared handle and kicks off one
    /// immediate sync so the preview reflects the initial field contents.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(self) -> Arc<Self> {
        let this = Arc::new(self);
        tracing::debug!(
            strategy = this.strategy.name(),
            interval = ?this.debouncer.interval(),
            "binding preview synchronizer"
        );
        let initial = Arc::clone(&this);
        tokio::spawn(async move {
            initial.debounced_sync().await;
        });
        this
    }

    /// Call on every edit to any watched field.
    pub fn on_field_changed(self: &Arc<Self>) {
        let this: Weak<Self> = Arc::downgrade(self);
        self.debouncer.schedule(move || {
            let Some(this) = this.upgrade() else {
                return;
            };
            // Run the sync outside the timer task so a later edit only
            // cancels the wait, never a request already in flight.
            tokio::spawn(async move {
                this.debounced_sync().await;
            });
        });
    }

    /// Read the current field values and push the resolved previews to the
    /// targets. Errors are reported and never returned.
    pub async fn debounced_sync(&self) -> SyncOutcome {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.resolve().await;

        if seq != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(seq, "dropping superseded preview result");
            self.counters.superseded.fetch_add(1, Ordering::Relaxed);
            return SyncOutcome::Superseded;
        }

        match result {
            Ok(previews) => {
                for (pair, preview) in self.targets.iter().zip(&previews) {
                    pair.set(preview);
                }
                tracing::debug!(seq, surfaces = previews.len(), "preview updated");
                self.counters.applied.fetch_add(1, Ordering::Relaxed);
                SyncOutcome::Applied
            }
            Err(err) => {
                tracing::error!(seq, strategy = self.strategy.name(), %err, "preview sync failed");
                self.reporter.report(&err);
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                SyncOutcome::Failed
            }
        }
    }

    /// Whether an edit is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn stats(&self) -> SyncStats {
        SyncStats {
            started: self.issued.load(Ordering::SeqCst),
            applied: self.counters.applied.load(Ordering::Relaxed),
            superseded: self.counters.superseded.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    async fn resolve(&self) -> SyncResult<Vec<String>> {
        let values = self.read_fields()?;
        let previews = self.strategy.resolve(&values).await?;
        if previews.len() != self.targets.len() {
            return Err(SyncError::TargetCount {
                expected: self.targets.len(),
                actual: previews.len(),
            });
        }
        Ok(previews)
    }

    fn read_fields(&self) -> SyncResult<Vec<(String, String)>> {
        self.field_names
            .iter()
            .map(|name| {
                self.fields
                    .get_field_value(name)
                    .map(|value| (name.clone(), value))
                    .ok_or_else(|| SyncError::MissingField(name.clone()))
            })
            .collect()
    }
}

impl std::fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("field_names", &self.field_names)
            .field("strategy", &self.strategy)
            .field("targets", &self.targets.len())
            .field("interval", &self.debouncer.interval())
            .finish_non_exhaustive()
    }
}
