//! Preview targets: the sinks a resolved preview reference is written to.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

/// Accepts a rendered-preview reference (a URL or context path).
pub trait PreviewTarget: Send + Sync {
    fn set_preview(&self, value: &str);
}

/// A viewer and a link that always show the same preview.
#[derive(Clone)]
pub struct PreviewPair {
    viewer: Arc<dyn PreviewTarget>,
    link: Arc<dyn PreviewTarget>,
}

impl PreviewPair {
    pub fn new(viewer: Arc<dyn PreviewTarget>, link: Arc<dyn PreviewTarget>) -> Self {
        Self { viewer, link }
    }

    /// Write `value` to both halves of the pair.
    pub fn set(&self, value: &str) {
        self.viewer.set_preview(value);
        self.link.set_preview(value);
    }
}

impl std::fmt::Debug for PreviewPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewPair").finish_non_exhaustive()
    }
}

/// In-memory target remembering the last value written.
#[derive(Debug, Default)]
pub struct TargetSlot {
    value: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl TargetSlot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times a value has been written.
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreviewTarget for TargetSlot {
    fn set_preview(&self, value: &str) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

/// Prints each new preview link to stdout.
///
/// Root-relative references (`/blog/~preview?ctx=...`) are resolved against
/// the page origin so the printed link can be opened directly.
#[derive(Debug)]
pub struct TerminalTarget {
    label: String,
    origin: Option<Url>,
}

impl TerminalTarget {
    pub fn new(label: impl Into<String>, page_url: &str) -> Self {
        Self {
            label: label.into(),
            origin: Url::parse(page_url).ok(),
        }
    }

    /// The link as it will be printed.
    pub fn resolve(&self, value: &str) -> String {
        if !value.starts_with('/') {
            return value.to_string();
        }
        self.origin
            .as_ref()
            .and_then(|origin| origin.join(value).ok())
            .map_or_else(|| value.to_string(), Into::into)
    }
}

impl PreviewTarget for TerminalTarget {
    fn set_preview(&self, value: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}: {}", self.label, self.resolve(value));
        let _ = out.flush();
    }
}

/// Records preview updates in the log only.
#[derive(Debug)]
pub struct LogTarget {
    label: String,
}

impl LogTarget {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PreviewTarget for LogTarget {
    fn set_preview(&self, value: &str) {
        tracing::info!(target = %self.label, preview = value, "preview updated");
    }
}
