//! HTTP transport for request-mode previews.
//!
//! The preview endpoint takes a form-encoded POST and answers with a JSON
//! list of opaque preview-context ids, one per rendered surface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{SyncError, SyncResult};

/// Default request timeout; the endpoint itself specifies none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters of an error response body kept in [`SyncError::Status`].
pub const STATUS_BODY_LIMIT: usize = 200;

/// Submits field values to a preview endpoint.
#[async_trait]
pub trait PreviewTransport: Send + Sync {
    /// POST `fields` to `url` and return the preview-context ids.
    async fn submit(&self, url: &str, fields: &[(String, String)]) -> SyncResult<Vec<String>>;
}

#[derive(Deserialize)]
#[serde(transparent)]
struct PreviewIds(Vec<String>);

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl PreviewTransport for HttpTransport {
    async fn submit(&self, url: &str, fields: &[(String, String)]) -> SyncResult<Vec<String>> {
        let response = self
            .client
            .post(url)
            .form(fields)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(&e))?;
        parse_ids(&body)
    }
}

impl HttpTransport {
    fn classify(&self, err: &reqwest::Error) -> SyncError {
        if err.is_timeout() {
            SyncError::Timeout(self.timeout)
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}

/// First [`STATUS_BODY_LIMIT`] characters of `body`, trimmed; error pages can
/// be whole HTML documents.
fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(STATUS_BODY_LIMIT) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

/// Parse the endpoint's JSON id list.
pub fn parse_ids(body: &str) -> SyncResult<Vec<String>> {
    serde_json::from_str::<PreviewIds>(body)
        .map(|ids| ids.0)
        .map_err(|e| SyncError::Malformed(e.to_string()))
}
