//! Error type definitions.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
///
/// These are the only errors that abort the run; everything downstream is
/// strategy-local and non-fatal.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Types of errors counted during URL processing.
///
/// Categorizes failures that cause a strategy to yield no emails. None of
/// these abort a job; the strategy chain advances past them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Transport errors
    FetchTimeout,
    FetchConnect,
    FetchStatus,
    FetchNonHtml,
    FetchOther,
    // Renderer errors
    RenderFailed,
    RenderUnavailable,
    // Cache write failure (non-fatal, in-memory copy retained)
    CacheWriteError,
    // The whole strategy chain exceeded its per-URL budget
    JobTimeout,
}

/// Informational metrics: which strategy resolved each domain.
///
/// Observability only, never correctness-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    CacheHit,
    StaticPageHit,
    ContactLinkHit,
    CandidateProbeHit,
    CrawlHit,
    RenderHit,
    NoEmailsFound,
}
