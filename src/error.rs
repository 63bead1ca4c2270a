//! Error types for the harvester.
//!
//! Network and parse failures inside the harvesting pipeline are recovered
//! where they happen (an empty day, a sentinel string); [`HarvestError`] only
//! travels as far as the stage that decides how to degrade. Configuration and
//! output failures are the ones that reach `main`.

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid date window: end {end} is before start {start}")]
    InvalidDateWindow { start: NaiveDate, end: NaiveDate },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
