//! How current field values become preview references.
//!
//! - [`UrlPreview`]: build the preview URL directly from the values
//! - [`RequestPreview`]: submit the values and view the returned contexts

mod query;
mod request;

pub use query::{UrlPreview, preview_url};
pub use request::{PREVIEW_VIEW_PATH, RequestPreview, view_url};

use std::time::Duration;

use crate::error::SyncResult;
use crate::page::{REQUEST_MODE_INTERVAL, URL_MODE_INTERVAL};

/// Per-page choice of how a sync resolves previews.
#[derive(Debug, Clone)]
pub enum SyncStrategy {
    Url(UrlPreview),
    Request(RequestPreview),
}

impl SyncStrategy {
    /// Resolve one preview reference per preview pair, in pair order.
    ///
    /// `values` are the current `(field, value)` pairs in field order.
    ///
    /// # Errors
    /// Request mode fails on any transport, status or payload problem.
    pub async fn resolve(&self, values: &[(String, String)]) -> SyncResult<Vec<String>> {
        match self {
            Self::Url(plan) => Ok(plan.urls(values)),
            Self::Request(plan) => plan.fetch(values).await,
        }
    }

    /// Number of preview pairs this strategy fills.
    pub fn surfaces(&self) -> usize {
        match self {
            Self::Url(plan) => plan.surfaces(),
            Self::Request(plan) => plan.surfaces(),
        }
    }

    /// Debounce interval used when none is configured.
    pub const fn default_interval(&self) -> Duration {
        match self {
            Self::Url(_) => URL_MODE_INTERVAL,
            Self::Request(_) => REQUEST_MODE_INTERVAL,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Request(_) => "request",
        }
    }
}
