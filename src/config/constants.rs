//! Configuration constants.

use std::time::Duration;

/// Default User-Agent header value sent with every request.
///
/// A realistic desktop browser string: many sites serve reduced or blocked
/// content to obvious bot user agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout for plain HTTP fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Hard ceiling on processing a single URL, covering the whole strategy
/// chain including the rendered-page fallback.
pub const URL_PROCESSING_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for a rendered-page navigation.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum redirect hops followed by the HTTP client.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Maximum retry attempts for transient fetch errors on the primary page.
pub const RETRY_MAX_ATTEMPTS: usize = 3;

/// Base delay for the exponential retry backoff, in milliseconds.
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// How many contact-page links found on the main page are fetched.
pub const MAX_CONTACT_LINKS: usize = 5;

/// How many generated candidate contact URLs are probed.
pub const MAX_CANDIDATE_PROBES: usize = 10;

/// Upper bound on generated candidate contact URLs per site.
pub const MAX_CANDIDATE_URLS: usize = 30;

/// Cache is flushed to disk after every this many completed URLs, so an
/// interrupted run loses at most this much already-computed work.
pub const CACHE_FLUSH_INTERVAL: usize = 10;

/// Interval between progress log lines, in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 10;
