//! Initialization of shared resources.
//!
//! Constructors for the logger, the HTTP client, and the concurrency
//! semaphore, called once at the start of a run.

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;

use std::sync::Arc;
use tokio::sync::Semaphore;

/// Creates the admission-control semaphore bounding in-flight URL jobs.
pub fn init_semaphore(max_concurrency: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(max_concurrency.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_semaphore_permits() {
        let semaphore = init_semaphore(5);
        assert_eq!(semaphore.available_permits(), 5);
    }

    #[test]
    fn test_init_semaphore_zero_clamped() {
        // A zero concurrency setting would deadlock every job; clamp to one.
        let semaphore = init_semaphore(0);
        assert_eq!(semaphore.available_permits(), 1);
    }
}
