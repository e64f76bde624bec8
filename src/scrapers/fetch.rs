//! Page retrieval.
//!
//! [`PageSource`] is the seam between the pipeline and the network. The
//! production implementation, [`HttpFetcher`], makes exactly one GET per
//! address with a fixed timeout and browser-like headers; there are no
//! retries. Bodies are fetched as bytes and decoded with the charset the
//! server or the page itself declares.

use std::time::{Duration, Instant};

use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};
use url::Url;

use super::charset::decode_body;
use crate::error::FetchError;
use crate::utils::truncate_for_log;

/// Desktop browser identity sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
/// Preferred response language.
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Something that can produce the raw HTML of a page.
pub trait PageSource {
    /// Retrieve the body of `url`.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageSource`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        debug!(?timeout, "Built HTTP client");
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let t0 = Instant::now();
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(parsed).send().await.map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let raw = resp.bytes().await.map_err(transport)?;
        let (body, encoding) = decode_body(&raw, content_type.as_deref());
        debug!(
            bytes = raw.len(),
            encoding = encoding.name(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            preview = %truncate_for_log(&body, 120),
            "Fetched page"
        );
        Ok(body)
    }
}
