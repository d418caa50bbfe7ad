//! Processing statistics tracking.
//!
//! Thread-safe counters for errors and informational metrics, shared across
//! concurrent jobs via `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType};

/// Thread-safe processing statistics tracker.
///
/// All counters are initialized to zero on creation; increments use relaxed
/// atomics since the counts are only read after the run settles.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ProcessingStats { errors, info }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Error counter for {:?} missing from stats map; this indicates \
                 a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info: InfoType) {
        if let Some(counter) = self.info.get(&info) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Info counter for {:?} missing from stats map; this indicates \
                 a bug in ProcessingStats initialization.",
                info
            );
        }
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    pub fn get_info_count(&self, info: InfoType) -> usize {
        self.info
            .get(&info)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    pub fn total_errors(&self) -> usize {
        self.errors
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    pub fn total_info(&self) -> usize {
        self.info.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Log a summary of all non-zero counters at the end of a run.
    pub fn log_summary(&self) {
        if self.total_errors() > 0 {
            log::info!("Errors encountered during the run:");
            for error_type in ErrorType::iter() {
                let count = self.get_error_count(error_type);
                if count > 0 {
                    log::info!("  {:?}: {}", error_type, count);
                }
            }
        }
        log::info!("Resolution breakdown:");
        for info_type in InfoType::iter() {
            let count = self.get_info_count(info_type);
            if count > 0 {
                log::info!("  {:?}: {}", info_type, count);
            }
        }
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
