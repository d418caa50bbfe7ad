//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `email_harvester` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use email_harvester::initialization::init_logger_with;
use email_harvester::{run_extraction, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if config.file.is_none() {
        println!("=== Email Harvester ===");
        println!("Enter URLs one per line. Submit an empty line or 'END' to start processing.");
    }

    match run_extraction(config).await {
        Ok(report) => {
            if report.total_urls == 0 {
                println!("No URLs provided. Exiting.");
                return Ok(());
            }

            println!("\n=== Results ===");
            if report.interrupted {
                println!("Run interrupted; partial results follow.");
            }
            println!(
                "Processed {} URL{} in {:.1} seconds",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            println!(
                "Average time per URL: {:.2} seconds",
                report.elapsed_seconds / report.total_urls as f64
            );

            for (url, emails) in &report.results {
                println!("{url}: {} emails", emails.len());
            }

            let total_emails: usize = report.results.values().map(|e| e.len()).sum();
            println!("\nTotal emails found: {total_emails}");
            println!("Unique emails found: {}", report.unique_emails);
            println!("Emails saved to {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("email_harvester error: {:#}", e);
            process::exit(1);
        }
    }
}
