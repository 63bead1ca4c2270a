//! Command-line interface definitions.
//!
//! Every run parameter can also come from a YAML config file (`--config`);
//! flags given on the command line win over the file. See
//! [`HarvestConfig::resolve`](crate::config::HarvestConfig::resolve).

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for a harvest run.
///
/// # Examples
///
/// ```sh
/// # First fortnight of January 2011, at most 50 articles
/// archive_harvest --start 2011-01-01 --end 2011-01-15 -n 50 -o january.csv
///
/// # Also write a JSON report
/// archive_harvest --start 2011-01-01 --end 2011-01-03 -j ./json
///
/// # Settings from a file
/// archive_harvest -c harvest.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// First archive day to scan (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last archive day to scan, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Maximum number of articles to collect
    #[arg(short = 'n', long, env = "HARVEST_MAX_ARTICLES")]
    pub max_articles: Option<usize>,

    /// CSV output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for the JSON report
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of archive days fetched concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Word budget for each summary
    #[arg(long)]
    pub summary_words: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Root URL of the archive site
    #[arg(long, env = "HARVEST_BASE_URL")]
    pub base_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Sort results by archive day instead of completion order
    #[arg(long)]
    pub sort: bool,
}
