//! Command line crawler for realtylink.org rental listings.
//!
//! Runs the full pipeline and writes the extracted listings to a JSON
//! file. Every setting can be given as a flag or an environment variable.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use realtylink_core::{RealtylinkScraper, ScraperConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "realtylink")]
#[command(about = "Crawl realtylink.org rental listings into a JSON file")]
#[command(version)]
struct Args {
    /// Pagination API endpoint
    #[arg(
        long,
        env = "REALTYLINK_API_URL",
        default_value = "https://realtylink.org/Property/GetInscriptions"
    )]
    api_url: String,

    /// Site host prefixed to relative listing links
    #[arg(long, env = "REALTYLINK_HOST", default_value = "https://realtylink.org")]
    host: String,

    /// Number of listings to collect
    #[arg(short, long, env = "REALTYLINK_RECORDS", default_value_t = 60)]
    records: usize,

    /// Listings served per API page
    #[arg(long, env = "REALTYLINK_PAGE_SIZE", default_value_t = 20)]
    page_size: usize,

    /// Detail pages fetched concurrently
    #[arg(short, long, env = "REALTYLINK_CONCURRENCY", default_value_t = 8)]
    concurrency: usize,

    /// Extraction worker threads (defaults to available CPUs)
    #[arg(long, env = "REALTYLINK_WORKERS")]
    workers: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, env = "REALTYLINK_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Output file for the listing JSON
    #[arg(
        short,
        long,
        env = "REALTYLINK_OUTPUT",
        default_value = "data/output.json"
    )]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,realtylink_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let started = Instant::now();

    let mut config = ScraperConfig {
        api_url: args.api_url,
        host: args.host,
        target_records: args.records,
        page_size: args.page_size,
        fetch_concurrency: args.concurrency,
        timeout_secs: args.timeout,
        ..ScraperConfig::default()
    };
    if let Some(workers) = args.workers {
        config.extract_workers = workers;
    }

    tracing::info!(records = config.target_records, "Starting RealtyLink crawl");

    let scraper = RealtylinkScraper::with_config(config).context("Failed to build scraper")?;
    let report = scraper.run().await.context("Crawl failed")?;

    for failure in &report.failures {
        tracing::warn!(url = %failure.url, reason = %failure.reason, "Listing skipped");
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let json =
        serde_json::to_string_pretty(&report.listings).context("Failed to serialize listings")?;
    fs::write(&args.output, json)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    tracing::info!(
        listings = report.listings.len(),
        failures = report.failures.len(),
        "Saved listings to {}",
        args.output.display()
    );
    tracing::info!("Crawl finished in {:.2} seconds", started.elapsed().as_secs_f64());

    Ok(())
}
