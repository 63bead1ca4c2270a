//! Archive and article scraping.
//!
//! The harvest works in two levels, each in its own module:
//!
//! 1. **Archive** ([`archive`]): one index page per calendar day, listing links
//!    to the articles filed under that day
//! 2. **Article** ([`article`]): one page per article, holding the headline and
//!    body text
//!
//! Both levels go through the [`PageFetcher`] trait. [`HttpFetcher`] is the
//! production implementation: a shared `reqwest` client with a request
//! timeout, single attempt per request, and body decoding that honours the
//! declared charset or sniffs one when the server does not declare it.

pub mod archive;
pub mod article;
#[cfg(test)]
pub(crate) mod testing;

use crate::error::{HarvestError, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Source of HTML pages.
pub trait PageFetcher {
    /// GET `url` and return the decoded body. Non-2xx responses are errors.
    async fn get_html(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::limited(8))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get_html(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "GET completed"
        );
        Ok(decode_body(&body, content_type.as_deref()))
    }
}

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("meta charset pattern is valid")
});

/// How many leading bytes are scanned for a `<meta>` charset declaration.
const SNIFF_WINDOW: usize = 1024;

/// Decode an HTML body to text.
///
/// Uses the `charset` parameter of `content_type` when it names a known
/// encoding; otherwise sniffs a byte order mark, then a `<meta charset>` or
/// `http-equiv` declaration near the top of the document, then strict UTF-8,
/// and finally falls back to windows-1252.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()));

    let encoding = declared.unwrap_or_else(|| sniff_encoding(bytes));
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\''))
    })
}

fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_WINDOW)]);
    if let Some(encoding) = META_CHARSET
        .captures(&head)
        .and_then(|caps| Encoding::for_label(caps[1].as_bytes()))
    {
        return encoding;
    }

    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}
