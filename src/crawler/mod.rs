//! Bounded same-site crawling.
//!
//! Breadth-first traversal restricted to the start URL's domain, bounded by
//! page count, depth, and an optional wall-clock budget. By default the
//! crawl ends as soon as any page yields an email: the goal is one contact
//! address per site, not exhaustive discovery. That tradeoff is a config
//! knob, not a constant.

pub mod links;

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::fetch::PageFetcher;
use crate::matcher::EmailMatcher;

/// Crawl bounds and policy.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum traversal depth from the start page.
    pub max_depth: usize,
    /// Maximum pages visited per crawl invocation.
    pub max_pages: usize,
    /// Wall-clock budget per crawl invocation; `None` disables the budget.
    pub budget: Option<Duration>,
    /// End the crawl on the first page that yields any email.
    pub stop_on_first_hit: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 30,
            budget: Some(Duration::from_secs(300)),
            stop_on_first_hit: true,
        }
    }
}

/// Per-invocation traversal state; discarded when `crawl` returns.
struct CrawlState {
    visited: HashSet<String>,
    frontier: VecDeque<(String, usize)>,
    pages_visited: usize,
}

/// Same-site breadth-first email crawler.
pub struct Crawler {
    fetcher: PageFetcher,
    matcher: EmailMatcher,
    config: CrawlerConfig,
}

impl Crawler {
    pub fn new(fetcher: PageFetcher, matcher: EmailMatcher, config: CrawlerConfig) -> Self {
        Crawler {
            fetcher,
            matcher,
            config,
        }
    }

    /// Crawls a site starting from `start_url` and returns the emails found.
    ///
    /// Fetch failures are non-fatal; the frontier simply advances. Returns
    /// whatever was accumulated when a bound is hit, possibly nothing.
    pub async fn crawl(&self, start_url: &str) -> BTreeSet<String> {
        let mut all_emails = BTreeSet::new();

        let Some(start) = crate::app::url::validate_and_normalize_url(start_url) else {
            return all_emails;
        };
        let Some(start_host) = crate::app::url::domain_of(&start) else {
            return all_emails;
        };

        let deadline = self.config.budget.map(|budget| Instant::now() + budget);
        let mut state = CrawlState {
            visited: HashSet::new(),
            frontier: VecDeque::from([(start, 0)]),
            pages_visited: 0,
        };

        while let Some((current_url, depth)) = state.frontier.pop_front() {
            if state.pages_visited >= self.config.max_pages {
                debug!("Crawl of {start_host} hit the {} page limit", self.config.max_pages);
                break;
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    debug!("Crawl of {start_host} exceeded its time budget");
                    break;
                }
            }
            if state.visited.contains(&current_url) || depth > self.config.max_depth {
                continue;
            }

            state.visited.insert(current_url.clone());
            state.pages_visited += 1;

            let Some(html_content) = self.fetcher.fetch_html(&current_url).await else {
                continue;
            };

            let emails = self.matcher.extract_emails(&html_content);
            if !emails.is_empty() {
                info!("Found {} emails on {current_url}", emails.len());
                all_emails.extend(emails);
                if self.config.stop_on_first_hit {
                    break;
                }
            }

            if depth >= self.config.max_depth {
                continue;
            }

            for link in links::extract_links(&html_content, &current_url, &start_host) {
                if !state.visited.contains(&link) {
                    state.frontier.push_back((link, depth + 1));
                }
            }
        }

        all_emails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ProcessingStats;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use std::sync::Arc;

    fn crawler_with(config: CrawlerConfig) -> Crawler {
        let fetcher = PageFetcher::new(
            Arc::new(reqwest::Client::new()),
            Arc::new(ProcessingStats::new()),
        );
        Crawler::new(fetcher, EmailMatcher::new(), config)
    }

    fn html_response(body: &str) -> impl httptest::responders::Responder {
        status_code(200)
            .append_header("Content-Type", "text/html")
            .body(body.to_string())
    }

    #[tokio::test]
    async fn test_crawl_finds_email_on_linked_page() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(html_response(
                r#"<html><a href="/team">Team</a></html>"#,
            )),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/team"))
                .respond_with(html_response("<html>mail: crew@crawltest.net</html>")),
        );

        let emails = crawler_with(CrawlerConfig::default())
            .crawl(&server.url("/").to_string())
            .await;
        assert!(emails.contains("crew@crawltest.net"));
    }

    #[tokio::test]
    async fn test_crawl_stops_on_first_hit() {
        let server = Server::run();
        // Start page already has an email; the linked page must never be
        // fetched (no expectation registered for it).
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(html_response(
                r#"<html>hello@crawltest.net <a href="/more">more</a></html>"#,
            )),
        );

        let emails = crawler_with(CrawlerConfig::default())
            .crawl(&server.url("/").to_string())
            .await;
        assert_eq!(emails.len(), 1);
    }

    #[tokio::test]
    async fn test_crawl_respects_max_pages() {
        let server = Server::run();
        // Each page links to the next; only max_pages of them may be hit.
        server.expect(
            Expectation::matching(request::method_path("GET", "/p0"))
                .respond_with(html_response(r#"<html><a href="/p1">next</a></html>"#)),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/p1"))
                .respond_with(html_response(r#"<html><a href="/p2">next</a></html>"#)),
        );
        // /p2 has no expectation: the two-page bound must stop the crawl
        // before it is requested.

        let config = CrawlerConfig {
            max_pages: 2,
            max_depth: 10,
            ..Default::default()
        };
        let emails = crawler_with(config).crawl(&server.url("/p0").to_string()).await;
        assert!(emails.is_empty());
    }

    #[tokio::test]
    async fn test_crawl_respects_max_depth() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(html_response(
                r#"<html><a href="/d1">1</a></html>"#,
            )),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/d1")).respond_with(html_response(
                r#"<html><a href="/d2">2</a></html>"#,
            )),
        );
        // Depth 1 pages are fetched but their links are not followed, so /d2
        // has no expectation.

        let config = CrawlerConfig {
            max_depth: 1,
            ..Default::default()
        };
        let emails = crawler_with(config).crawl(&server.url("/").to_string()).await;
        assert!(emails.is_empty());
    }

    #[tokio::test]
    async fn test_crawl_survives_fetch_failures() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(html_response(
                r#"<html><a href="/broken">x</a><a href="/ok">y</a></html>"#,
            )),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/broken"))
                .respond_with(status_code(500)),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/ok"))
                .respond_with(html_response("<html>alive@crawltest.net</html>")),
        );

        let emails = crawler_with(CrawlerConfig::default())
            .crawl(&server.url("/").to_string())
            .await;
        assert!(emails.contains("alive@crawltest.net"));
    }

    #[tokio::test]
    async fn test_crawl_invalid_start_url() {
        let emails = crawler_with(CrawlerConfig::default()).crawl("not a url").await;
        assert!(emails.is_empty());
    }
}
