//! Daily archive index scraping.
//!
//! The archive lists each day's articles at
//! `{base}/{year}/{month}/{day}/archivelist/year-{year},month-{month},starttime-{offset}.cms`,
//! where `offset` is the day number computed by
//! [`archive_offset`](crate::scheduler::archive_offset). The link list sits
//! inside `span` elements with a fixed inline style; article links are told
//! apart from section links by `articleshow` in the href.

use super::PageFetcher;
use super::article::{element_text, fetch_article};
use crate::analysis::{categorize, summarize};
use crate::dedup::{Claim, SharedHarvestState};
use crate::error::Result;
use crate::models::ArticleRecord;
use crate::utils::truncate_for_log;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Href fragment identifying article links.
pub const ARTICLE_MARKER: &str = "articleshow";

/// Inline style of the `span` wrapping the day's link list.
pub const LINK_LIST_STYLE: &str = "font-family:arial ;font-size:12;color: #006699";

static STYLED_SPAN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[style]").expect("span selector is valid"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// An article link found on an archive page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLink {
    /// Absolute article URL.
    pub url: String,
    /// The anchor's text.
    pub headline: String,
}

/// Build the archive index URL for `date`.
pub fn archive_url(base: &Url, date: NaiveDate, offset: i64) -> Result<Url> {
    let (year, month, day) = (date.year(), date.month(), date.day());
    let path = format!(
        "/{year}/{month}/{day}/archivelist/year-{year},month-{month},starttime-{offset}.cms"
    );
    Ok(base.join(&path)?)
}

/// Collect article links from an archive page, in page order.
///
/// Relative hrefs are resolved against `base`; hrefs that cannot be resolved
/// are skipped.
pub fn parse_archive_links(html: &str, base: &Url) -> Vec<ArchiveLink> {
    let document = Html::parse_document(html);

    document
        .select(&STYLED_SPAN_SELECTOR)
        .filter(|span| span.value().attr("style") == Some(LINK_LIST_STYLE))
        .flat_map(|span| span.select(&ANCHOR_SELECTOR))
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !href.contains(ARTICLE_MARKER) {
                return None;
            }
            let url = base.join(href).ok()?;
            Some(ArchiveLink {
                url: url.to_string(),
                headline: element_text(anchor),
            })
        })
        .collect()
}

/// Fetches one archive day and turns its new article links into records.
#[derive(Debug)]
pub struct ArchiveFetcher<F> {
    fetcher: F,
    base_url: Url,
    summary_words: usize,
}

impl<F: PageFetcher> ArchiveFetcher<F> {
    pub fn new(fetcher: F, base_url: Url, summary_words: usize) -> Self {
        Self {
            fetcher,
            base_url,
            summary_words,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Harvest one archive day.
    ///
    /// Every candidate link is claimed in `state` before any article request
    /// is made; links already claimed by any task are skipped. At most
    /// `remaining_quota` records are built by this call, and none once the
    /// shared capacity is exhausted. A failed archive request yields an empty
    /// list. Records are returned in the order their links appear on the page.
    #[instrument(level = "info", skip(self, state))]
    pub async fn fetch_day(
        &self,
        date: NaiveDate,
        offset: i64,
        state: &SharedHarvestState,
        remaining_quota: usize,
    ) -> Vec<ArticleRecord> {
        let url = match archive_url(&self.base_url, date, offset) {
            Ok(url) => url,
            Err(e) => {
                error!(error = %e, "Could not build archive URL");
                return Vec::new();
            }
        };

        info!(%url, "Fetching archive list");
        let html = match self.fetcher.get_html(url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                error!(%url, error = %e, "Archive fetch failed; skipping day");
                return Vec::new();
            }
        };

        let links = parse_archive_links(&html, &self.base_url);
        if links.is_empty() {
            warn!(preview = %truncate_for_log(&html, 200), "No articles found");
            return Vec::new();
        }
        debug!(candidates = links.len(), "Parsed archive links");

        let mut records = Vec::new();
        for link in links {
            if records.len() >= remaining_quota {
                debug!(remaining_quota, "Per-day quota reached");
                break;
            }

            match state.try_claim(&link.url) {
                Claim::Accepted => {}
                Claim::Duplicate => {
                    debug!(url = %link.url, "Already collected; skipping");
                    continue;
                }
                Claim::Exhausted => {
                    debug!("Harvest capacity exhausted");
                    break;
                }
            }

            let content = fetch_article(&self.fetcher, &link.url).await;
            let summary = summarize(&content, self.summary_words);
            let category = categorize(&link.headline, &content);
            records.push(ArticleRecord::new(
                link.url,
                link.headline,
                content,
                summary,
                category,
                date,
            ));
        }

        info!(count = records.len(), "Harvested archive day");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::{FakeFetcher, archive_page, article_page};

    const BASE: &str = "https://timesofindia.indiatimes.com";

    fn base() -> Url {
        Url::parse(BASE).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_archive_url_template() {
        let url = archive_url(&base(), day(2011, 1, 1), 40544).unwrap();
        assert_eq!(
            url.as_str(),
            "https://timesofindia.indiatimes.com/2011/1/1/archivelist/year-2011,month-1,starttime-40544.cms"
        );
    }

    #[test]
    fn test_archive_url_two_digit_fields() {
        let url = archive_url(&base(), day(2012, 11, 23), 41236).unwrap();
        assert!(url.as_str().ends_with("/2012/11/23/archivelist/year-2012,month-11,starttime-41236.cms"));
    }

    #[test]
    fn test_parse_keeps_only_article_links_in_styled_span() {
        let html = archive_page(&[
            ("/india/articleshow/1.cms", "First story"),
            ("/sports", "Sports section"),
            ("https://timesofindia.indiatimes.com/city/articleshow/2.cms", "Second story"),
        ]);

        let links = parse_archive_links(&html, &base());
        assert_eq!(
            links,
            vec![
                ArchiveLink {
                    url: format!("{BASE}/india/articleshow/1.cms"),
                    headline: "First story".to_string(),
                },
                ArchiveLink {
                    url: format!("{BASE}/city/articleshow/2.cms"),
                    headline: "Second story".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_ignores_unstyled_spans() {
        let html = r#"<span style="color: red"><a href="/articleshow/9.cms">x</a></span>
<span><a href="/articleshow/8.cms">y</a></span>"#;
        assert!(parse_archive_links(html, &base()).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_day_builds_records_in_page_order() {
        let date = day(2011, 1, 1);
        let index = archive_url(&base(), date, 40544).unwrap();
        let fetcher = FakeFetcher::new()
            .with_page(
                index.as_str(),
                archive_page(&[
                    ("/india/articleshow/1.cms", "Election called"),
                    ("/india/articleshow/2.cms", "Rain lashes coast"),
                ]),
            )
            .with_page(
                &format!("{BASE}/india/articleshow/1.cms"),
                article_page("Election called", "The government set a date. Campaigns begin."),
            )
            .with_page(
                &format!("{BASE}/india/articleshow/2.cms"),
                article_page("Rain lashes coast", "Heavy showers continue."),
            );

        let archive = ArchiveFetcher::new(fetcher, base(), 250);
        let state = SharedHarvestState::new(10);
        let records = archive.fetch_day(date, 40544, &state, 10).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, format!("{BASE}/india/articleshow/1.cms"));
        assert_eq!(records[0].headline, "Election called");
        assert_eq!(
            records[0].content,
            "Election called\nThe government set a date. Campaigns begin."
        );
        assert_eq!(
            records[0].summary,
            "Election called The government set a date. Campaigns begin."
        );
        assert_eq!(records[0].category, "Politics");
        assert_eq!(records[0].date, "01/01/2011");
        assert_eq!(records[1].category, "Weather");
    }

    #[tokio::test]
    async fn test_fetch_day_failure_is_empty() {
        let archive = ArchiveFetcher::new(FakeFetcher::new(), base(), 250);
        let state = SharedHarvestState::new(10);
        let records = archive.fetch_day(day(2011, 1, 1), 40544, &state, 10).await;
        assert!(records.is_empty());
        assert_eq!(state.claimed(), 0);
    }

    #[tokio::test]
    async fn test_fetch_day_skips_claimed_and_repeated_links() {
        let date = day(2011, 1, 2);
        let index = archive_url(&base(), date, 40545).unwrap();
        let fetcher = FakeFetcher::new().with_page(
            index.as_str(),
            archive_page(&[
                ("/a/articleshow/1.cms", "One"),
                ("/a/articleshow/2.cms", "Two"),
                ("/a/articleshow/2.cms", "Two again"),
                ("/a/articleshow/3.cms", "Three"),
            ]),
        );
        let archive = ArchiveFetcher::new(fetcher, base(), 250);
        let state = SharedHarvestState::new(10);
        assert_eq!(state.try_claim(&format!("{BASE}/a/articleshow/1.cms")), Claim::Accepted);

        let records = archive.fetch_day(date, 40545, &state, 10).await;
        let urls: Vec<_> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                format!("{BASE}/a/articleshow/2.cms"),
                format!("{BASE}/a/articleshow/3.cms"),
            ]
        );
        // Article pages are missing, so content degrades to the sentinel.
        assert_eq!(records[0].content, "Content not available");
        assert_eq!(records[0].headline, "Two");
    }

    #[tokio::test]
    async fn test_fetch_day_respects_quota_before_fetching_articles() {
        let date = day(2011, 1, 3);
        let index = archive_url(&base(), date, 40546).unwrap();
        let fetcher = FakeFetcher::new().with_page(
            index.as_str(),
            archive_page(&[
                ("/a/articleshow/1.cms", "One"),
                ("/a/articleshow/2.cms", "Two"),
                ("/a/articleshow/3.cms", "Three"),
            ]),
        );
        let archive = ArchiveFetcher::new(fetcher, base(), 250);
        let state = SharedHarvestState::new(10);

        let records = archive.fetch_day(date, 40546, &state, 2).await;
        assert_eq!(records.len(), 2);
        assert_eq!(state.claimed(), 2);
        // One archive request plus one request per built record.
        assert_eq!(archive.fetcher.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_day_stops_when_capacity_exhausted() {
        let date = day(2011, 1, 4);
        let index = archive_url(&base(), date, 40547).unwrap();
        let fetcher = FakeFetcher::new().with_page(
            index.as_str(),
            archive_page(&[("/a/articleshow/1.cms", "One"), ("/a/articleshow/2.cms", "Two")]),
        );
        let archive = ArchiveFetcher::new(fetcher, base(), 250);
        let state = SharedHarvestState::new(1);

        let records = archive.fetch_day(date, 40547, &state, 10).await;
        assert_eq!(records.len(), 1);
        assert_eq!(state.remaining(), 0);
    }
}
