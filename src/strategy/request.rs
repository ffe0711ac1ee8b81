use std::sync::Arc;

use crate::error::{SyncError, SyncResult};
use crate::transport::PreviewTransport;

/// Path that serves a rendered preview context.
pub const PREVIEW_VIEW_PATH: &str = "/blog/~preview";

/// Submits field values and maps each returned context id to a viewing URL.
#[derive(Clone)]
pub struct RequestPreview {
    endpoint: String,
    transport: Arc<dyn PreviewTransport>,
    surfaces: usize,
}

impl RequestPreview {
    /// Post to `{page_url}/preview`, or `{page_url}/preview?minimal` when
    /// `minimal` is set, expecting `surfaces` ids back.
    pub fn new(
        page_url: &str,
        transport: Arc<dyn PreviewTransport>,
        surfaces: usize,
        minimal: bool,
    ) -> Self {
        let mut endpoint = format!("{}/preview", page_url.trim_end_matches('/'));
        if minimal {
            endpoint.push_str("?minimal");
        }
        Self {
            endpoint,
            transport,
            surfaces,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) const fn surfaces(&self) -> usize {
        self.surfaces
    }

    pub(crate) async fn fetch(&self, values: &[(String, String)]) -> SyncResult<Vec<String>> {
        let ids = self.transport.submit(&self.endpoint, values).await?;
        if ids.len() != self.surfaces {
            return Err(SyncError::TargetCount {
                expected: self.surfaces,
                actual: ids.len(),
            });
        }
        Ok(ids.iter().map(|id| view_url(id)).collect())
    }
}

impl std::fmt::Debug for RequestPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPreview")
            .field("endpoint", &self.endpoint)
            .field("surfaces", &self.surfaces)
            .finish_non_exhaustive()
    }
}

/// Viewing URL for a preview context id.
pub fn view_url(id: &str) -> String {
    format!("{PREVIEW_VIEW_PATH}?ctx={}", urlencoding::encode(id))
}
