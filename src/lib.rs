//! email_harvester library: contact email extraction for website lists.
//!
//! Discovers publicly listed contact addresses for a set of target websites
//! by running each URL through an ordered chain of increasingly expensive
//! strategies: static-page scan, contact-page discovery, generated URL
//! probes, a bounded same-site crawl, and a rendered-page fallback. Results
//! are cached per domain across runs.
//!
//! # Example
//!
//! ```no_run
//! use email_harvester::{run_extraction, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: Some(std::path::PathBuf::from("urls.txt")),
//!     max_concurrency: 20,
//!     ..Default::default()
//! };
//!
//! let report = run_extraction(config).await?;
//! println!("Found {} unique emails across {} URLs",
//!          report.unique_emails, report.total_urls);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions within an async context.

#![warn(missing_docs)]

mod app;
mod cache;
pub mod config;
mod crawler;
mod error_handling;
mod fetch;
pub mod initialization;
mod locator;
mod matcher;
mod output;
mod pipeline;
mod renderer;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::{run_extraction, ExtractionReport};

// Internal run module (contains the batch/concurrency control logic)
mod run {
    use std::collections::{BTreeMap, BTreeSet, HashSet};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, shutdown_gracefully, validate_and_normalize_url};
    use crate::cache::DomainCache;
    use crate::config::{Config, CACHE_FLUSH_INTERVAL, URL_PROCESSING_TIMEOUT};
    use crate::crawler::{Crawler, CrawlerConfig};
    use crate::error_handling::{ErrorType, ProcessingStats};
    use crate::fetch::PageFetcher;
    use crate::initialization::{init_client, init_semaphore};
    use crate::locator::ContactPageLocator;
    use crate::matcher::EmailMatcher;
    use crate::pipeline::ExtractionOrchestrator;
    use crate::renderer::Renderer;

    /// Results of an extraction run.
    #[derive(Debug)]
    pub struct ExtractionReport {
        /// Number of URLs dispatched after normalization and deduplication.
        pub total_urls: usize,
        /// Emails per input URL, keyed by normalized URL. URLs that yielded
        /// nothing appear with an empty set.
        pub results: BTreeMap<String, BTreeSet<String>>,
        /// Unique addresses written to the output file.
        pub unique_emails: usize,
        /// Path of the written output file.
        pub output_path: PathBuf,
        /// Elapsed wall-clock time in seconds.
        pub elapsed_seconds: f64,
        /// Whether the run was cut short by an interrupt. Partial results
        /// are still written.
        pub interrupted: bool,
    }

    /// Runs an extraction over the configured URL list.
    ///
    /// This is the main library entry point. URLs are read from the input
    /// file (or stdin), normalized and deduplicated preserving order,
    /// partitioned into batches, and processed under a bounded concurrency
    /// limit. Each URL runs the full strategy chain; results are aggregated
    /// by URL and the merged sorted email list is written to the output
    /// file. An interrupt (Ctrl-C) stops dispatch, flushes the cache, and
    /// still writes the output file from what was resolved so far.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-recoverable top-level failures: the
    /// input file cannot be read, the HTTP client cannot be built, or the
    /// output file cannot be written. Per-URL failures never surface here.
    pub async fn run_extraction(config: Config) -> Result<ExtractionReport> {
        let raw_urls = read_urls(&config).await?;

        // Normalize and dedupe, first occurrence wins, caller order kept.
        let mut seen = HashSet::new();
        let urls: Vec<String> = raw_urls
            .iter()
            .filter_map(|line| validate_and_normalize_url(line))
            .filter(|url| seen.insert(url.clone()))
            .collect();

        let total_urls = urls.len();
        info!("Processing {total_urls} URLs");

        let stats = Arc::new(ProcessingStats::new());
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let fetcher = PageFetcher::new(client, Arc::clone(&stats));
        let cache = Arc::new(DomainCache::load(&config.cache));
        let renderer = Arc::new(Renderer::new(!config.no_renderer, Arc::clone(&stats)));

        let crawler = Crawler::new(
            fetcher.clone(),
            EmailMatcher::new(),
            CrawlerConfig {
                max_depth: config.crawl_max_depth,
                max_pages: config.crawl_max_pages,
                budget: (config.crawl_budget_secs > 0)
                    .then(|| Duration::from_secs(config.crawl_budget_secs)),
                stop_on_first_hit: true,
            },
        );

        let orchestrator = Arc::new(ExtractionOrchestrator::new(
            fetcher,
            EmailMatcher::new(),
            ContactPageLocator::new(),
            crawler,
            Arc::clone(&renderer),
            Arc::clone(&cache),
            Arc::clone(&stats),
        ));

        // Concurrency never exceeds the number of URLs.
        let concurrency = config.max_concurrency.min(total_urls.max(1));
        let semaphore = init_semaphore(concurrency);

        let start_time = std::time::Instant::now();
        let completed_urls = Arc::new(AtomicUsize::new(0));
        let emails_found = Arc::new(AtomicUsize::new(0));

        let cancel = CancellationToken::new();
        let interrupt_token = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, saving partial results");
                interrupt_token.cancel();
            }
        });

        let mut results: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut interrupted = false;

        // Batches bound how many URLs are held for dispatch at once; the
        // semaphore bounds how many are actually in flight.
        'batches: for batch in urls.chunks(config.batch_size.max(1)) {
            let mut tasks = FuturesUnordered::new();

            for url in batch {
                let permit = tokio::select! {
                    _ = cancel.cancelled() => {
                        interrupted = true;
                        break;
                    }
                    permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => {
                            warn!("Semaphore closed, skipping URL: {url}");
                            continue;
                        }
                    },
                };

                let orchestrator = Arc::clone(&orchestrator);
                let stats = Arc::clone(&stats);
                let url = url.clone();
                tasks.push(tokio::spawn(async move {
                    let _permit = permit;
                    let resolved =
                        tokio::time::timeout(URL_PROCESSING_TIMEOUT, orchestrator.resolve(&url))
                            .await;
                    match resolved {
                        Ok(result) => (url, result.emails),
                        Err(_) => {
                            warn!("Timeout processing URL {url}");
                            stats.increment_error(ErrorType::JobTimeout);
                            (url, BTreeSet::new())
                        }
                    }
                }));
            }

            // Collect completions in whatever order they finish; the result
            // map is keyed by URL, so completion order is irrelevant.
            loop {
                let joined = tokio::select! {
                    _ = cancel.cancelled() => {
                        interrupted = true;
                        break;
                    }
                    next = tasks.next() => match next {
                        Some(joined) => joined,
                        None => break,
                    },
                };

                match joined {
                    Ok((url, emails)) => {
                        emails_found.fetch_add(emails.len(), Ordering::SeqCst);
                        results.insert(url, emails);
                    }
                    Err(join_error) => {
                        warn!("Task panicked: {join_error:?}");
                    }
                }

                let completed = completed_urls.fetch_add(1, Ordering::SeqCst) + 1;
                log_progress(start_time, &completed_urls, total_urls, &emails_found);

                if completed % CACHE_FLUSH_INTERVAL == 0 {
                    if let Err(e) = cache.flush().await {
                        stats.increment_error(ErrorType::CacheWriteError);
                        warn!("Periodic cache flush failed: {e}");
                    }
                }
            }

            if interrupted {
                for task in tasks.iter() {
                    task.abort();
                }
                break 'batches;
            }
        }

        shutdown_gracefully(cancel, None, &cache).await;
        renderer.close().await;

        let unique_emails = crate::output::write_output_file(&config.output, &results)
            .context("Failed to write output file")?;

        stats.log_summary();

        Ok(ExtractionReport {
            total_urls,
            results,
            unique_emails,
            output_path: config.output.clone(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
            interrupted,
        })
    }

    /// Reads raw URL lines from the input file, or interactively from stdin
    /// until a blank line or an `END` sentinel.
    async fn read_urls(config: &Config) -> Result<Vec<String>> {
        let mut urls = Vec::new();

        match &config.file {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open input file {}", path.display()))?;
                let mut lines = BufReader::new(file).lines();
                while let Some(line) = lines.next_line().await.context("Failed to read input")? {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    urls.push(trimmed.to_string());
                }
            }
            None => {
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("end") {
                        break;
                    }
                    urls.push(trimmed.to_string());
                }
            }
        }

        Ok(urls)
    }
}
