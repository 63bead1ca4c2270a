//! Data models for harvested articles and the date range being scanned.
//!
//! - [`ArticleRecord`]: one harvested article, in the column order of the CSV output
//! - [`DateWindow`]: the inclusive range of archive days a harvest covers
//! - [`HarvestReport`]: the JSON document written alongside the CSV
//!
//! The serde field names are the capitalized column names of the output
//! file, hence the `rename` attributes.

use crate::error::{HarvestError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Publication identifier written into every record.
pub const NEWSPAPER: &str = "The Times of India";

/// Format of [`ArticleRecord::date`].
pub const RECORD_DATE_FORMAT: &str = "%d/%m/%Y";

/// A single article discovered on an archive day.
///
/// `url` is the deduplication key: within one harvest no two records share it.
/// `date` is the archive day the link was listed under, which is not
/// necessarily when the article was published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The publication the record came from.
    #[serde(rename = "Newspaper")]
    pub source: String,
    /// Absolute article URL.
    #[serde(rename = "Link")]
    pub url: String,
    /// Anchor text of the archive link.
    #[serde(rename = "Headline")]
    pub headline: String,
    /// Extracted headline and body, newline separated.
    #[serde(rename = "Content")]
    pub content: String,
    /// Extractive summary of `content`.
    #[serde(rename = "Summary")]
    pub summary: String,
    /// Keyword category label.
    #[serde(rename = "Category")]
    pub category: String,
    /// Archive day in `DD/MM/YYYY` form.
    #[serde(rename = "Date")]
    pub date: String,
}

impl ArticleRecord {
    pub fn new(
        url: String,
        headline: String,
        content: String,
        summary: String,
        category: &str,
        archive_day: NaiveDate,
    ) -> Self {
        Self {
            source: NEWSPAPER.to_string(),
            url,
            headline,
            content,
            summary,
            category: category.to_string(),
            date: archive_day.format(RECORD_DATE_FORMAT).to_string(),
        }
    }

    /// The archive day this record was discovered under.
    pub fn archive_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, RECORD_DATE_FORMAT).ok()
    }
}

/// Stable sort by archive day.
///
/// Records from one day come from a single task and are already in anchor
/// order, so a stable sort yields `(date, discovery order)`.
pub fn sort_by_archive_day(records: &mut [ArticleRecord]) {
    records.sort_by_key(|r| r.archive_day());
}

/// An inclusive, gapless range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(HarvestError::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the window, both ends included.
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Summary of one harvest run, serialized to the JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct HarvestReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_articles: usize,
    pub collected: usize,
    pub articles: Vec<ArticleRecord>,
}

impl HarvestReport {
    pub fn new(window: &DateWindow, max_articles: usize, articles: Vec<ArticleRecord>) -> Self {
        Self {
            start_date: window.start(),
            end_date: window.end(),
            max_articles,
            collected: articles.len(),
            articles,
        }
    }
}
