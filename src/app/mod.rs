//! Main application modules.
//!
//! Utilities for URL validation, progress logging, and shutdown handling
//! used by the run loop.

pub mod logging;
pub mod shutdown;
pub mod url;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use url::{domain_of, validate_and_normalize_url};
