//! The extraction pipeline.
//!
//! Wires the matcher, locator, crawler, renderer, and cache into the
//! fixed-order fallback chain that resolves one URL to a set of addresses.

mod orchestrator;

use std::collections::BTreeSet;

use strum_macros::Display;

pub use orchestrator::ExtractionOrchestrator;

/// Which extraction technique produced a result.
///
/// Observability only: strategy attribution never feeds back into
/// correctness-bearing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Strategy {
    /// Cache lookup by domain.
    Cache,
    /// Direct scan of the fetched page.
    StaticPage,
    /// A contact link discovered on the page.
    ContactLink,
    /// A synthesized candidate contact URL.
    CandidateProbe,
    /// Bounded same-site crawl.
    Crawl,
    /// Headless-browser rendered page.
    Render,
}

/// Outcome of resolving one URL.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The domain the result is keyed under.
    pub domain: String,
    /// Unique addresses found; empty when every strategy came up dry.
    pub emails: BTreeSet<String>,
    /// The strategy that produced the emails; `None` for an empty result.
    pub strategy: Option<Strategy>,
}

impl ExtractionResult {
    fn empty(domain: String) -> Self {
        ExtractionResult {
            domain,
            emails: BTreeSet::new(),
            strategy: None,
        }
    }
}
