//! Page fetching.
//!
//! Thin wrapper over the shared `reqwest` client implementing the fetch
//! collaborator contract: given a URL, yield the HTML body or nothing.
//! Non-2xx statuses and non-HTML content types are "no content", not
//! errors; transport failures are logged, counted, and swallowed so the
//! strategy chain can advance.

use std::sync::Arc;

use log::{debug, warn};

use crate::error_handling::{
    categorize_reqwest_error, get_retry_strategy, is_retriable_error, ErrorType, ProcessingStats,
};

/// Fetches pages and yields HTML bodies.
#[derive(Clone)]
pub struct PageFetcher {
    client: Arc<reqwest::Client>,
    stats: Arc<ProcessingStats>,
}

impl PageFetcher {
    pub fn new(client: Arc<reqwest::Client>, stats: Arc<ProcessingStats>) -> Self {
        PageFetcher { client, stats }
    }

    /// Fetches a URL and returns its body when it is a successful HTML
    /// response. Any failure mode returns `None`.
    pub async fn fetch_html(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                self.stats.increment_error(categorize_reqwest_error(&e));
                warn!("Error fetching {url}: {e}");
                None
            }
        }
    }

    /// Like [`fetch_html`](Self::fetch_html), retrying transient transport
    /// errors with exponential backoff. Used for the primary page fetch,
    /// where one flaky connection would otherwise sink the whole chain for
    /// that URL.
    pub async fn fetch_html_with_retry(&self, url: &str) -> Option<String> {
        let result = tokio_retry::RetryIf::spawn(
            get_retry_strategy(),
            || self.try_fetch(url),
            |e: &reqwest::Error| is_retriable_error(e),
        )
        .await;

        match result {
            Ok(body) => body,
            Err(e) => {
                self.stats.increment_error(categorize_reqwest_error(&e));
                warn!("Error fetching {url} after retries: {e}");
                None
            }
        }
    }

    /// One fetch attempt. `Ok(None)` covers the "no content" cases that
    /// must not be retried: non-2xx status and non-HTML content type.
    async fn try_fetch(&self, url: &str) -> Result<Option<String>, reqwest::Error> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Failed to fetch {url}: HTTP {status}");
            self.stats.increment_error(ErrorType::FetchStatus);
            return Ok(None);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();
        if !content_type.contains("text/html") && !content_type.contains("application/xhtml+xml") {
            debug!("Skipping non-HTML content at {url}: {content_type}");
            self.stats.increment_error(ErrorType::FetchNonHtml);
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(Some(body))
    }
}
