//! Marquee main entry point
//!
//! This is the command-line interface for the Marquee movie catalog scraper.

use clap::Parser;
use marquee::config::{load_config_with_hash, validate, Config};
use marquee::crawler::{run_scrape, Coordinator};
use marquee::output::print_statistics;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Marquee: a movie catalog scraper
///
/// Marquee walks the catalog's paginated movie listing, visits every movie's
/// detail page, and exports one row per movie to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(version = "1.0.0")]
#[command(about = "A movie catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the CSV export here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Scrape listing pages up to this page number
    #[arg(long, value_name = "N")]
    pages: Option<u32>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show which pages would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    tracing::info!(pid = std::process::id(), "Marquee starting");

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(config)?;
    } else {
        handle_scrape(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("marquee=info,warn"),
            1 => EnvFilter::new("marquee=debug,info"),
            2 => EnvFilter::new("marquee=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if let Some(pages) = cli.pages {
        config.site.last_page = pages;
    }
}

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Marquee Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!(
        "  Pages: {}..={}",
        config.site.first_page, config.site.last_page
    );

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Max attempts per URL: {}", config.fetcher.max_attempts);
    println!("  Retry delay: {}ms", config.fetcher.retry_delay_ms);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);

    println!("\nScraper:");
    println!("  Concurrent detail fetches: {}", config.scraper.concurrency);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    let coordinator = Coordinator::new(config)?;
    let urls = coordinator.page_urls()?;

    println!("\nListing pages ({}):", urls.len());
    for url in &urls {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Scraping {} pages {}..={}, writing {}",
        config.site.base_url,
        config.site.first_page,
        config.site.last_page,
        config.output.csv_path
    );

    match run_scrape(config).await {
        Ok(report) => {
            print_statistics(&report.statistics);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
