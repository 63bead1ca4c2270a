//! # Archive Harvest
//!
//! Collects newspaper articles listed in a date-indexed web archive, extracts
//! their text, summarizes and categorizes them, and writes a bounded,
//! duplicate-free set of records to CSV (and optionally JSON).
//!
//! ## Usage
//!
//! ```sh
//! archive_harvest --start 2011-01-01 --end 2011-01-15 -n 100 -o news.csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Scheduling**: one task per archive day, at most 10 in flight
//! 2. **Indexing**: each task reads its day's archive list and claims new article URLs
//! 3. **Extraction**: each claimed article is fetched, summarized and categorized
//! 4. **Output**: records are capped, optionally sorted, and written out

use clap::Parser;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod config;
mod dedup;
mod error;
mod models;
mod outputs;
mod scheduler;
mod scrapers;
mod utils;

use cli::Cli;
use config::HarvestConfig;
use models::{HarvestReport, sort_by_archive_day};
use scheduler::HarvestScheduler;
use scrapers::HttpFetcher;
use scrapers::archive::ArchiveFetcher;
use utils::{ensure_writable_dir, parent_dir};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    info!("archive_harvest starting up");

    // Parse CLI and resolve configuration
    let args = Cli::parse();
    let config = match HarvestConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    debug!(?config, "Resolved configuration");
    let window = config.window()?;

    // Early check: ensure the CSV destination is writable
    let output_dir = parent_dir(&config.output_csv);
    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Harvest ----
    let fetcher = HttpFetcher::new(&config.user_agent, config.request_timeout())?;
    let archive = ArchiveFetcher::new(fetcher, config.base_url()?, config.summary_words);
    let scheduler = HarvestScheduler::new(archive, config.concurrency);

    info!(
        start = %window.start(),
        end = %window.end(),
        days = window.num_days(),
        max_articles = config.max_articles,
        concurrency = config.concurrency,
        "Starting harvest"
    );
    let mut records = scheduler.harvest(&window, config.max_articles).await;

    if config.sort_results {
        sort_by_archive_day(&mut records);
        debug!("Sorted records by archive day");
    }

    // ---- CSV output ----
    outputs::csv::write_csv(&records, &config.output_csv)?;
    info!(
        count = records.len(),
        path = %config.output_csv.display(),
        "Collected {} news articles and saved to {}",
        records.len(),
        config.output_csv.display()
    );

    // ---- JSON output ----
    if let Some(json_dir) = &config.json_output_dir {
        let report = HarvestReport::new(&window, config.max_articles, records);
        if let Err(e) = outputs::json::write_report(&report, json_dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
