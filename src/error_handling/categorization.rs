//! Error categorization and retry strategy.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::ErrorType;

/// Creates the exponential backoff retry strategy for transient fetch errors.
///
/// Limited to `RETRY_MAX_ATTEMPTS` so retries stay well inside the per-URL
/// processing budget.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_BASE_DELAY_MS)
        .factor(2)
        .max_delay(Duration::from_secs(5))
        .take(crate::config::RETRY_MAX_ATTEMPTS)
}

/// Categorizes a `reqwest::Error` into an `ErrorType` counter bucket.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::FetchTimeout
    } else if error.is_connect() {
        ErrorType::FetchConnect
    } else if error.status().is_some() {
        ErrorType::FetchStatus
    } else {
        ErrorType::FetchOther
    }
}

/// Whether a fetch error is transient and worth retrying.
///
/// Timeouts, connection failures, and 5xx/429 statuses are retriable;
/// permanent client errors (4xx) are not.
pub fn is_retriable_error(error: &reqwest::Error) -> bool {
    if let Some(status) = error.status() {
        let code = status.as_u16();
        if code == 429 {
            return true;
        }
        if (400..500).contains(&code) {
            return false;
        }
        if (500..600).contains(&code) {
            return true;
        }
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_strategy_delays_grow() {
        let delays: Vec<_> = get_retry_strategy().collect();
        assert!(delays.len() >= 2);
        assert!(delays[1] > delays[0]);
    }

    #[test]
    fn test_retry_strategy_capped() {
        for delay in get_retry_strategy() {
            assert!(delay <= Duration::from_secs(5));
        }
    }
}
