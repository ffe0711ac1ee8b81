/// Builds preview URLs of the form `{page}/{path}?{field}={value}&...`.
#[derive(Debug, Clone)]
pub struct UrlPreview {
    page_url: String,
    paths: Vec<String>,
}

impl UrlPreview {
    /// One preview URL per entry in `paths`, each relative to `page_url`.
    pub fn new<I, S>(page_url: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            page_url: page_url.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn urls(&self, values: &[(String, String)]) -> Vec<String> {
        self.paths
            .iter()
            .map(|path| preview_url(&self.page_url, path, values))
            .collect()
    }

    pub(crate) fn surfaces(&self) -> usize {
        self.paths.len()
    }
}

/// Join `page_url` and `path`, then append every value percent-encoded.
pub fn preview_url(page_url: &str, path: &str, values: &[(String, String)]) -> String {
    let query = values
        .iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let base = page_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if query.is_empty() {
        format!("{base}/{path}")
    } else {
        format!("{base}/{path}?{query}")
    }
}
