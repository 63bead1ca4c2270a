//! Run configuration.
//!
//! Settings are resolved from three layers, highest priority first:
//! command-line flags, an optional YAML file, built-in defaults.
//!
//! ```yaml
//! start_date: 2011-01-01
//! end_date: 2011-01-15
//! max_articles: 100
//! output_csv: news_archive.csv
//! concurrency: 10
//! ```

use crate::analysis::summarize::DEFAULT_SUMMARY_WORDS;
use crate::cli::Cli;
use crate::error::{HarvestError, Result};
use crate::models::DateWindow;
use crate::scheduler::DEFAULT_CONCURRENCY;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://timesofindia.indiatimes.com";
pub const DEFAULT_OUTPUT_CSV: &str = "dummy_news_archive.csv";
pub const DEFAULT_MAX_ARTICLES: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_START: NaiveDate = match NaiveDate::from_ymd_opt(2011, 1, 1) {
    Some(date) => date,
    None => panic!("default start is a valid date"),
};
const DEFAULT_END: NaiveDate = match NaiveDate::from_ymd_opt(2011, 1, 15) {
    Some(date) => date,
    None => panic!("default end is a valid date"),
};

/// Contents of the YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_articles: Option<usize>,
    pub output_csv: Option<PathBuf>,
    pub json_output_dir: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub summary_words: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub sort_results: Option<bool>,
}

/// Load and parse a YAML config file.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HarvestError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    let config = serde_yaml::from_str(&content)?;
    info!(path = %path.display(), "Loaded configuration file");
    Ok(config)
}

/// Fully resolved settings for one harvest run.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_articles: usize,
    pub output_csv: PathBuf,
    pub json_output_dir: Option<PathBuf>,
    pub concurrency: usize,
    pub summary_words: usize,
    pub request_timeout_secs: u64,
    pub base_url: String,
    pub user_agent: String,
    pub sort_results: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START,
            end_date: DEFAULT_END,
            max_articles: DEFAULT_MAX_ARTICLES,
            output_csv: PathBuf::from(DEFAULT_OUTPUT_CSV),
            json_output_dir: None,
            concurrency: DEFAULT_CONCURRENCY,
            summary_words: DEFAULT_SUMMARY_WORDS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            sort_results: false,
        }
    }
}

impl HarvestConfig {
    /// Read the config file named by `cli` (if any) and merge it with the flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Layer `cli` over `file` over the defaults, then validate.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            start_date: cli.start.or(file.start_date).unwrap_or(defaults.start_date),
            end_date: cli.end.or(file.end_date).unwrap_or(defaults.end_date),
            max_articles: cli
                .max_articles
                .or(file.max_articles)
                .unwrap_or(defaults.max_articles),
            output_csv: cli
                .output
                .clone()
                .or(file.output_csv)
                .unwrap_or(defaults.output_csv),
            json_output_dir: cli.json_output_dir.clone().or(file.json_output_dir),
            concurrency: cli
                .concurrency
                .or(file.concurrency)
                .unwrap_or(defaults.concurrency),
            summary_words: cli
                .summary_words
                .or(file.summary_words)
                .unwrap_or(defaults.summary_words),
            request_timeout_secs: cli
                .timeout_secs
                .or(file.request_timeout_secs)
                .unwrap_or(defaults.request_timeout_secs),
            base_url: cli
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or(defaults.base_url),
            user_agent: cli
                .user_agent
                .clone()
                .or(file.user_agent)
                .unwrap_or(defaults.user_agent),
            sort_results: cli.sort || file.sort_results.unwrap_or(defaults.sort_results),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(HarvestError::Config("concurrency must be at least 1".into()));
        }
        if self.summary_words == 0 {
            return Err(HarvestError::Config("summary_words must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(HarvestError::Config("request timeout must be at least 1 second".into()));
        }
        self.window()?;
        self.base_url()?;
        Ok(())
    }

    pub fn window(&self) -> Result<DateWindow> {
        DateWindow::new(self.start_date, self.end_date)
    }

    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
