//! Date-range harvest scheduling.
//!
//! [`HarvestScheduler::harvest`] runs one [`ArchiveFetcher::fetch_day`] task
//! per day of a [`DateWindow`] with at most `concurrency` tasks in flight,
//! appending each day's records as its task completes. Completion order is
//! not submission order, so the same window can yield a different (always
//! duplicate-free, always capped) subset on another run.
//!
//! Once the cap is reached the scheduler stops polling and drops the
//! remaining tasks; whatever they had built is discarded.

use crate::dedup::SharedHarvestState;
use crate::models::{ArticleRecord, DateWindow};
use crate::scrapers::PageFetcher;
use crate::scrapers::archive::ArchiveFetcher;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Archive day number of [`ARCHIVE_EPOCH`].
pub const BASE_STARTTIME: i64 = 40179;

/// Day the archive's `starttime` numbering is anchored to.
pub const ARCHIVE_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2010, 1, 1) {
    Some(date) => date,
    None => panic!("archive epoch is a valid date"),
};

/// Default number of archive days fetched concurrently.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// The archive's `starttime` parameter for `date`: a linear day count from
/// [`ARCHIVE_EPOCH`]. Days before the epoch give smaller (possibly negative)
/// values.
pub fn archive_offset(date: NaiveDate) -> i64 {
    BASE_STARTTIME + (date - ARCHIVE_EPOCH).num_days()
}

/// Fans archive days out over a bounded pool and enforces the result cap.
#[derive(Debug)]
pub struct HarvestScheduler<F> {
    archive: ArchiveFetcher<F>,
    concurrency: usize,
}

impl<F: PageFetcher> HarvestScheduler<F> {
    pub fn new(archive: ArchiveFetcher<F>, concurrency: usize) -> Self {
        Self {
            archive,
            concurrency: concurrency.max(1),
        }
    }

    /// Harvest up to `max_articles` records from every day of `window`.
    ///
    /// The result never holds more than `max_articles` records and never
    /// repeats a URL. It is in task completion order. Days that fail
    /// contribute nothing; the harvest itself cannot fail.
    #[instrument(
        level = "info",
        skip(self, window),
        fields(start = %window.start(), end = %window.end(), concurrency = self.concurrency)
    )]
    pub async fn harvest(&self, window: &DateWindow, max_articles: usize) -> Vec<ArticleRecord> {
        let t0 = Instant::now();
        if max_articles == 0 {
            info!("Nothing requested; skipping harvest");
            return Vec::new();
        }

        let state = SharedHarvestState::new(max_articles);
        let state = &state;
        let archive = &self.archive;

        info!(
            days = window.num_days(),
            base_url = %archive.base_url(),
            "Scheduling archive days"
        );

        // Each task snapshots the quota when the pool first polls it.
        let mut completions = stream::iter(window.days())
            .map(|date| async move {
                let offset = archive_offset(date);
                let quota = state.remaining();
                archive.fetch_day(date, offset, state, quota).await
            })
            .buffer_unordered(self.concurrency);

        let mut records: Vec<ArticleRecord> = Vec::new();
        while let Some(day_records) = completions.next().await {
            records.extend(day_records);
            info!(
                collected = records.len(),
                "Collected {} news articles so far",
                records.len()
            );

            if records.len() >= max_articles {
                debug!("Article cap reached; abandoning remaining days");
                break;
            }
        }
        drop(completions);

        records.truncate(max_articles);
        info!(
            count = records.len(),
            claimed = state.claimed(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Harvest finished"
        );
        records
    }
}
