//! Graceful shutdown handling.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cache::DomainCache;

/// Shuts down background tasks and persists the cache.
///
/// Called both on normal completion and after an interrupt; the cache flush
/// here is what guarantees partial results survive a Ctrl-C.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
    cache: &Arc<DomainCache>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }

    if let Err(e) = cache.flush().await {
        log::warn!("Failed to flush domain cache during shutdown: {e}");
    }
}
