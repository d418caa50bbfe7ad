//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Run configuration.
///
/// Doubles as the CLI surface (via `clap::Parser`) and the programmatic
/// library configuration; `Default` gives the same values as running the
/// binary with no arguments.
///
/// # Examples
///
/// ```no_run
/// use email_harvester::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: Some(PathBuf::from("urls.txt")),
///     max_concurrency: 20,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "email_harvester", about = "Extract contact email addresses from websites")]
pub struct Config {
    /// File to read URLs from, one per line. When omitted, URLs are read
    /// interactively from stdin until a blank line or `END`.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output file: one email per line, sorted
    #[arg(long, default_value = "emails.txt")]
    pub output: PathBuf,

    /// Domain cache file (JSON object: domain -> [emails])
    #[arg(long, default_value = "email_cache.json")]
    pub cache: PathBuf,

    /// Maximum concurrent URL jobs
    #[arg(long, default_value_t = 20)]
    pub max_concurrency: usize,

    /// URLs held in memory per dispatch batch
    #[arg(long, default_value_t = 50)]
    pub batch_size: usize,

    /// Maximum pages visited per crawl
    #[arg(long, default_value_t = 30)]
    pub crawl_max_pages: usize,

    /// Maximum crawl depth from the start page
    #[arg(long, default_value_t = 2)]
    pub crawl_max_depth: usize,

    /// Wall-clock budget per crawl, in seconds (0 disables the budget)
    #[arg(long, default_value_t = 300)]
    pub crawl_budget_secs: u64,

    /// Disable the rendered-page fallback (no headless browser launched)
    #[arg(long)]
    pub no_renderer: bool,

    /// HTTP User-Agent header value
    #[arg(long, default_value = crate::config::DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            output: PathBuf::from("emails.txt"),
            cache: PathBuf::from("email_cache.json"),
            max_concurrency: 20,
            batch_size: 50,
            crawl_max_pages: 30,
            crawl_max_depth: 2,
            crawl_budget_secs: 300,
            no_renderer: false,
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_concurrency, 20);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.crawl_max_pages, 30);
        assert_eq!(config.crawl_max_depth, 2);
        assert!(!config.no_renderer);
        assert_eq!(config.cache, PathBuf::from("email_cache.json"));
        assert_eq!(config.output, PathBuf::from("emails.txt"));
    }

    #[test]
    fn test_config_parses_defaults() {
        // `clap` defaults must agree with `Default` so the two construction
        // paths cannot drift apart.
        let parsed = Config::parse_from(["email_harvester"]);
        let default = Config::default();
        assert_eq!(parsed.max_concurrency, default.max_concurrency);
        assert_eq!(parsed.batch_size, default.batch_size);
        assert_eq!(parsed.output, default.output);
        assert_eq!(parsed.cache, default.cache);
        assert_eq!(parsed.user_agent, default.user_agent);
    }
}
