//! Errors raised while resolving a preview.

use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong during one synchronization attempt.
///
/// None of these ever escape the synchronizer: they are logged, reported to
/// the user and counted, and the preview targets keep their last good value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The request never completed.
    #[error("network error: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("preview request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The preview endpoint answered with a non-success status.
    #[error("preview endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a JSON list of strings.
    #[error("malformed preview response: {0}")]
    Malformed(String),

    /// A watched field could not be read.
    #[error("field `{0}` is unavailable")]
    MissingField(String),

    /// The endpoint returned a different number of previews than there are targets.
    #[error("expected {expected} preview ids, got {actual}")]
    TargetCount { expected: usize, actual: usize },
}

pub type SyncResult<T> = Result<T, SyncError>;
