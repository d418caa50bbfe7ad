//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs progress information about URL processing.
///
/// Emitted after each completed job and on the periodic ticker: processed
/// count against the total, emails found so far, and elapsed time.
pub fn log_progress(
    start_time: std::time::Instant,
    completed_urls: &Arc<AtomicUsize>,
    total_urls: usize,
    emails_found: &Arc<AtomicUsize>,
) {
    let completed = completed_urls.load(Ordering::SeqCst);
    let emails = emails_found.load(Ordering::SeqCst);
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let percent = if total_urls > 0 {
        (completed as f64 / total_urls as f64) * 100.0
    } else {
        0.0
    };
    info!(
        "Progress: {}/{} URLs ({:.1}%) - Found {} emails - Elapsed: {:.1}s",
        completed, total_urls, percent, emails, elapsed_secs
    );
}
