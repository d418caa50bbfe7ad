//! HTTP client initialization.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use reqwest::ClientBuilder;

use crate::config::{Config, FETCH_TIMEOUT, MAX_REDIRECT_HOPS};

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Browser-like default headers (Accept, Accept-Language)
/// - Per-request timeout
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS` hops)
/// - Rustls TLS backend
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));

    let client = ClientBuilder::new()
        .timeout(FETCH_TIMEOUT)
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_succeeds() {
        let config = Config::default();
        let client = init_client(&config);
        assert!(client.is_ok());
    }
}
