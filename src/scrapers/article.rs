//! Article page extraction.
//!
//! An article page carries its headline in `h1.HNMDR` and its body in
//! `div._s30J.clearfix`. Either may be missing on older pages; each missing
//! part is replaced by its own placeholder so a partially parsed page still
//! yields a record.

use super::PageFetcher;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument, warn};

pub const HEADLINE_UNAVAILABLE: &str = "Headline not available";
pub const CONTENT_UNAVAILABLE: &str = "Content not available";

static HEADLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.HNMDR").expect("headline selector is valid"));
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div._s30J.clearfix").expect("body selector is valid"));

/// Fetch an article and return `"{headline}\n{content}"`.
///
/// A failed request yields [`CONTENT_UNAVAILABLE`] on its own, with no
/// headline line.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_article<F: PageFetcher>(fetcher: &F, url: &str) -> String {
    info!("Fetching article content");
    match fetcher.get_html(url).await {
        Ok(html) => parse_article(&html),
        Err(e) => {
            warn!(error = %e, "Article fetch failed");
            CONTENT_UNAVAILABLE.to_string()
        }
    }
}

/// Extract headline and body text from an article page.
pub fn parse_article(html: &str) -> String {
    let document = Html::parse_document(html);

    let headline = document
        .select(&HEADLINE_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_else(|| HEADLINE_UNAVAILABLE.to_string());
    let content = document
        .select(&BODY_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_else(|| CONTENT_UNAVAILABLE.to_string());

    format!("{headline}\n{content}")
}

/// Text of an element with each text node trimmed, empty nodes dropped and
/// the rest joined by single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::{FakeFetcher, article_page};

    #[test]
    fn test_parse_full_article() {
        let html = article_page(
            "Budget passed",
            "<p>The house voted.</p>\n  <p>Debate lasted hours.</p>",
        );
        assert_eq!(
            parse_article(&html),
            "Budget passed\nThe house voted. Debate lasted hours."
        );
    }

    #[test]
    fn test_missing_headline_only() {
        let html = r#"<div class="_s30J clearfix">Body text</div>"#;
        assert_eq!(parse_article(html), "Headline not available\nBody text");
    }

    #[test]
    fn test_missing_body_only() {
        let html = r#"<h1 class="HNMDR">Title</h1><div class="other">x</div>"#;
        assert_eq!(parse_article(html), "Title\nContent not available");
    }

    #[test]
    fn test_body_needs_both_classes() {
        let html = r#"<h1 class="HNMDR">Title</h1><div class="_s30J">x</div>"#;
        assert_eq!(parse_article(html), "Title\nContent not available");
    }

    #[test]
    fn test_headline_needs_its_class() {
        let html = r#"<h1>Title</h1><div class="clearfix _s30J">Body</div>"#;
        assert_eq!(parse_article(html), "Headline not available\nBody");
    }

    #[tokio::test]
    async fn test_fetch_article_success() {
        let url = "https://example.com/articleshow/1.cms";
        let fetcher = FakeFetcher::new().with_page(url, article_page("Title", "Body"));
        assert_eq!(fetch_article(&fetcher, url).await, "Title\nBody");
        assert_eq!(fetcher.requests(), vec![url.to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_article_failure_is_single_sentinel() {
        let fetcher = FakeFetcher::new();
        let text = fetch_article(&fetcher, "https://example.com/articleshow/404.cms").await;
        assert_eq!(text, CONTENT_UNAVAILABLE);
    }
}
