//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Processing statistics tracking (errors and info metrics)
//! - Retry strategy configuration
//!
//! Error types follow the pipeline's taxonomy: transport errors and renderer
//! errors are strategy-local and counted here; parse/validation errors are
//! discarded at the candidate level and never surface; cache I/O errors are
//! logged and counted but non-fatal.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, get_retry_strategy, is_retriable_error};
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError};
