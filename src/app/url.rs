//! URL validation and normalization utilities.

use log::warn;

/// Maximum URL length to keep pathological input lines out of the pipeline.
/// Matches common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes a URL.
///
/// Adds an `https://` prefix if no scheme is present, strips a trailing
/// slash, then validates that the result is syntactically valid and uses an
/// http/https scheme. Logs a warning and returns `None` for anything else.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            &url[..50.min(url.len())]
        );
        return None;
    }

    let mut normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.ends_with('/') {
        normalized.pop();
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            "http" | "https" => {
                warn!("Skipping URL without a host: {url}");
                None
            }
            _ => {
                warn!("Skipping unsupported scheme for URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}

/// Extracts the domain (host portion) of a URL.
///
/// The domain is the cache key: two URLs sharing a domain are the same
/// extraction unit. Accepts bare hostnames by normalizing first.
pub fn domain_of(url: &str) -> Option<String> {
    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };
    url::Url::parse(&normalized)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}
