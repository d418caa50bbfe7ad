//! The fallback state machine driving one URL through the strategy chain.
//!
//! Strategies are tried strictly in order, each only when the previous one
//! produced no emails: cache, static page scan, contact links, generated
//! candidate probes, bounded crawl, rendered page. Any strategy failure is
//! absorbed as "no emails from this strategy"; the chain always completes
//! and returns a (possibly empty) result.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{info, warn};

use crate::cache::DomainCache;
use crate::config::{MAX_CANDIDATE_PROBES, MAX_CONTACT_LINKS};
use crate::crawler::Crawler;
use crate::error_handling::{InfoType, ProcessingStats};
use crate::fetch::PageFetcher;
use crate::locator::ContactPageLocator;
use crate::matcher::EmailMatcher;
use crate::renderer::Renderer;

use super::{ExtractionResult, Strategy};

/// Per-URL extraction driver.
pub struct ExtractionOrchestrator {
    fetcher: PageFetcher,
    matcher: EmailMatcher,
    locator: ContactPageLocator,
    crawler: Crawler,
    renderer: Arc<Renderer>,
    cache: Arc<DomainCache>,
    stats: Arc<ProcessingStats>,
}

impl ExtractionOrchestrator {
    pub fn new(
        fetcher: PageFetcher,
        matcher: EmailMatcher,
        locator: ContactPageLocator,
        crawler: Crawler,
        renderer: Arc<Renderer>,
        cache: Arc<DomainCache>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        ExtractionOrchestrator {
            fetcher,
            matcher,
            locator,
            crawler,
            renderer,
            cache,
            stats,
        }
    }

    /// Resolves a URL to its set of contact addresses.
    pub async fn resolve(&self, url: &str) -> ExtractionResult {
        let Some(url) = crate::app::url::validate_and_normalize_url(url) else {
            return ExtractionResult::empty(String::new());
        };
        let Some(domain) = crate::app::url::domain_of(&url) else {
            return ExtractionResult::empty(String::new());
        };

        info!("Processing {url}");

        // Strategy 1: cache lookup, no network on a hit.
        if let Some(cached) = self.cache.get(&domain).await {
            info!("Using cached emails for {domain}");
            self.stats.increment_info(InfoType::CacheHit);
            return ExtractionResult {
                domain,
                emails: cached.into_iter().collect(),
                strategy: Some(Strategy::Cache),
            };
        }

        // Strategy 2: fetch the page itself. On failure the chain skips
        // straight to the crawl.
        if let Some(html_content) = self.fetcher.fetch_html_with_retry(&url).await {
            // Strategy 3: static scan of the main page.
            let emails = self.matcher.extract_emails(&html_content);
            if !emails.is_empty() {
                info!("Found {} emails on main page of {url}", emails.len());
                return self.finish(domain, emails, Strategy::StaticPage).await;
            }

            // Strategy 4a: follow contact links discovered on the page.
            let contact_urls = self.locator.find_contact_links(&html_content, &url);
            if !contact_urls.is_empty() {
                info!(
                    "Found {} potential contact pages on {url}",
                    contact_urls.len()
                );
            }
            for contact_url in contact_urls.into_iter().take(MAX_CONTACT_LINKS) {
                if let Some(emails) = self.probe(&contact_url).await {
                    info!("Found {} emails on contact page {contact_url}", emails.len());
                    return self.finish(domain, emails, Strategy::ContactLink).await;
                }
            }

            // Strategy 4b: probe generated candidate URLs.
            let candidates = self.locator.generate_candidate_urls(&url);
            for candidate_url in candidates.into_iter().take(MAX_CANDIDATE_PROBES) {
                if let Some(emails) = self.probe(&candidate_url).await {
                    info!(
                        "Found {} emails on candidate page {candidate_url}",
                        emails.len()
                    );
                    return self
                        .finish(domain, emails, Strategy::CandidateProbe)
                        .await;
                }
            }
        }

        // Strategy 5: bounded crawl.
        let emails = self.crawler.crawl(&url).await;
        if !emails.is_empty() {
            info!("Found {} emails by crawling {url}", emails.len());
            return self.finish(domain, emails, Strategy::Crawl).await;
        }

        // Strategy 6: rendered page, the terminal strategy.
        info!("Using rendered-page extraction on {url}");
        if let Some(rendered) = self.renderer.render(&url).await {
            let mut emails = self.matcher.extract_emails(&rendered.html);
            emails.extend(self.matcher.extract_emails(&rendered.script_text));
            if !emails.is_empty() {
                info!("Found {} emails by rendering {url}", emails.len());
                return self.finish(domain, emails, Strategy::Render).await;
            }
        }

        warn!("No emails found for {url}");
        self.stats.increment_info(InfoType::NoEmailsFound);
        ExtractionResult::empty(domain)
    }

    /// Fetches one contact-page candidate and matches it, with the
    /// labeled-page variant for legal-disclosure paths. `None` means the
    /// page yielded nothing.
    async fn probe(&self, url: &str) -> Option<BTreeSet<String>> {
        let html_content = self.fetcher.fetch_html(url).await?;
        let emails = if is_legal_disclosure_path(url) {
            self.matcher.extract_from_labeled_page(&html_content)
        } else {
            self.matcher.extract_emails(&html_content)
        };
        if emails.is_empty() {
            None
        } else {
            Some(emails)
        }
    }

    /// Records a successful resolution: write-through cache and stats.
    async fn finish(
        &self,
        domain: String,
        emails: BTreeSet<String>,
        strategy: Strategy,
    ) -> ExtractionResult {
        self.cache.put(&domain, &emails).await;
        self.stats.increment_info(match strategy {
            Strategy::Cache => InfoType::CacheHit,
            Strategy::StaticPage => InfoType::StaticPageHit,
            Strategy::ContactLink => InfoType::ContactLinkHit,
            Strategy::CandidateProbe => InfoType::CandidateProbeHit,
            Strategy::Crawl => InfoType::CrawlHit,
            Strategy::Render => InfoType::RenderHit,
        });
        ExtractionResult {
            domain,
            emails,
            strategy: Some(strategy),
        }
    }
}

/// Legal-disclosure pages label their contact fields; the stricter matcher
/// variant digs those out.
fn is_legal_disclosure_path(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("impressum") || lower.contains("imprint")
}
