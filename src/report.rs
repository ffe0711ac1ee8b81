//! User-visible failure reporting.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::error::SyncError;

/// Surfaces a failed synchronization to the person editing.
pub trait Reporter: Send + Sync {
    fn report(&self, err: &SyncError);
}

/// Writes failures to stderr, one line each.
#[derive(Debug, Default)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&self, err: &SyncError) {
        let mut out = std::io::stderr().lock();
        let _ = writeln!(out, "[error] preview failed: {err}");
        let _ = out.flush();
    }
}

/// Keeps every reported failure; useful when embedding or testing.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    errors: Mutex<Vec<SyncError>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<SyncError> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, err: &SyncError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(err.clone());
    }
}
