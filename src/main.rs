//! Orgmail main entry point
//!
//! This is the command-line interface for the orgmail contact crawler.

use anyhow::Context;
use clap::Parser;
use orgmail::config::load_config;
use orgmail::crawler::{check_connectivity, crawl};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Orgmail: a polite organization contact crawler
///
/// Orgmail walks a government organization directory, visits each
/// organization's pages with fixed politeness delays, and collects contact
/// email addresses into a deduplicated CSV file.
#[derive(Parser, Debug)]
#[command(name = "orgmail")]
#[command(version = "1.0.0")]
#[command(about = "A polite organization contact crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (optional; defaults cover the
    /// production crawl)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without any network
    /// traffic
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Probe the listing page and show a sample of organization links
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or run on defaults when no file is given
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            orgmail::Config::default()
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.check {
        check_connectivity(&config).await?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("orgmail=info,warn"),
            1 => EnvFilter::new("orgmail=debug,info"),
            2 => EnvFilter::new("orgmail=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &orgmail::Config) {
    println!("=== Orgmail Dry Run ===\n");

    println!("Target:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Listing page: {}", config.site.listing_path);
    println!(
        "  Organization segment: {}",
        config.site.organization_segment
    );

    println!("\nCrawler:");
    println!("  Max attempts per page: {}", config.crawler.max_attempts);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  Retry delay: {}ms", config.crawler.retry_delay_ms);
    println!("  Sub-page delay: {}ms", config.crawler.page_delay_ms);
    println!(
        "  Organization delay: {}ms",
        config.crawler.organization_delay_ms
    );

    println!("\nOutput:");
    println!("  CSV file: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: orgmail::Config) -> anyhow::Result<()> {
    tracing::info!("Starting organization email crawl");

    let report = crawl(config).await?;

    tracing::info!(
        "Crawl completed: {} organizations found, {} processed, {} failed",
        report.organizations_found,
        report.organizations_processed,
        report.organizations_failed
    );
    tracing::info!(
        "{} pages visited, {} records collected, {} unique",
        report.pages_visited,
        report.records_collected,
        report.unique_records
    );

    match report.output_path {
        Some(path) => println!("Results written to {}", path.display()),
        None => println!("No emails found; no output file written"),
    }

    Ok(())
}
