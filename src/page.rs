//! The two editor pages a synchronizer can be bound to.

use std::sync::Arc;
use std::time::Duration;

use crate::strategy::{RequestPreview, SyncStrategy, UrlPreview};
use crate::transport::PreviewTransport;

/// Debounce used when previews are plain URLs.
pub const URL_MODE_INTERVAL: Duration = Duration::from_millis(555);
/// Debounce used when previews need a round trip.
pub const REQUEST_MODE_INTERVAL: Duration = Duration::from_millis(666);

/// Which editor page is being previewed.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    /// New or edited blog post (`content` and `title`).
    #[default]
    Post,
    /// Blog stylesheet (`style`), previewed on the index and a post.
    Style,
}

/// How previews are resolved.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Build preview URLs with the values in the query string.
    #[default]
    Url,
    /// Submit the values and view the returned preview contexts.
    Request,
}

impl SyncMode {
    pub const fn default_interval(self) -> Duration {
        match self {
            Self::Url => URL_MODE_INTERVAL,
            Self::Request => REQUEST_MODE_INTERVAL,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Request => "request",
        }
    }
}

impl PageKind {
    /// Watched field names, in the order they are sent.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Post => &["content", "title"],
            Self::Style => &["style"],
        }
    }

    /// URL-mode preview paths, one per preview pair.
    pub const fn preview_paths(self) -> &'static [&'static str] {
        match self {
            Self::Post => &["preview"],
            Self::Style => &["preview/index", "preview/post"],
        }
    }

    /// Labels for the preview pairs.
    pub const fn surfaces(self) -> &'static [&'static str] {
        match self {
            Self::Post => &["post"],
            Self::Style => &["index", "post"],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Style => "style",
        }
    }

    /// URL-mode strategy for this page.
    pub fn url_strategy(self, page_url: &str) -> SyncStrategy {
        SyncStrategy::Url(UrlPreview::new(page_url, self.preview_paths().iter().copied()))
    }

    /// Request-mode strategy for this page.
    pub fn request_strategy(
        self,
        page_url: &str,
        transport: Arc<dyn PreviewTransport>,
        minimal: bool,
    ) -> SyncStrategy {
        SyncStrategy::Request(RequestPreview::new(
            page_url,
            transport,
            self.surfaces().len(),
            minimal,
        ))
    }
}
