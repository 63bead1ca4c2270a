//! In-memory [`PageFetcher`] and page builders for tests.

use super::PageFetcher;
use crate::error::{HarvestError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages by URL; unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl PageFetcher for FakeFetcher {
    async fn get_html(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        // Give other day tasks a chance to interleave.
        tokio::task::yield_now().await;
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| HarvestError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// An archive index page listing `(href, anchor text)` pairs.
pub(crate) fn archive_page(links: &[(&str, &str)]) -> String {
    let anchors: String = links
        .iter()
        .map(|(href, text)| format!(r#"<a href="{href}">{text}</a><br>"#))
        .collect();
    format!(
        r#"<html><body>
<div class="nav"><a href="/india">India</a></div>
<span style="font-family:arial ;font-size:12;color: #006699">{anchors}</span>
</body></html>"#
    )
}

/// An article page with the headline and body containers.
pub(crate) fn article_page(headline: &str, body: &str) -> String {
    format!(
        r#"<html><body>
<h1 class="HNMDR"><span>{headline}</span></h1>
<div class="_s30J clearfix">{body}</div>
</body></html>"#
    )
}
