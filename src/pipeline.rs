//! Sequential fetch-extract driver.
//!
//! Addresses are handled strictly one at a time, in input order, with a
//! fixed pause between consecutive addresses. Each address is its own error
//! boundary: a failed fetch turns into an error record for that address and
//! the run carries on, so the output always has exactly one record per input.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

use crate::error::FetchError;
use crate::models::ArticleRecord;
use crate::scrapers::{CompiledPolicy, PageSource, extract_from_html};

/// Result of processing one address.
#[derive(Debug)]
pub struct ArticleOutcome {
    /// The record shown for this address, an error record on failure.
    pub record: ArticleRecord,
    /// The fetch failure behind an error record.
    pub error: Option<FetchError>,
}

impl ArticleOutcome {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Process every address in `urls` and collect one record per address.
///
/// No pause follows the last address.
pub async fn collect_records<S>(
    source: &S,
    policy: &CompiledPolicy,
    urls: &[String],
    delay: Duration,
) -> Vec<ArticleRecord>
where
    S: PageSource,
{
    collect_outcomes(source, policy, urls, delay)
        .await
        .into_iter()
        .map(|outcome| outcome.record)
        .collect()
}

/// Like [`collect_records`], keeping each address's fetch error alongside
/// its record.
#[instrument(level = "info", skip_all, fields(count = urls.len(), ?delay))]
pub async fn collect_outcomes<S>(
    source: &S,
    policy: &CompiledPolicy,
    urls: &[String],
    delay: Duration,
) -> Vec<ArticleOutcome>
where
    S: PageSource,
{
    let outcomes: Vec<ArticleOutcome> = stream::iter(urls.iter().enumerate())
        .then(|(i, url)| async move {
            if i > 0 && !delay.is_zero() {
                debug!(?delay, "Pausing before next article");
                sleep(delay).await;
            }
            match process_article(source, policy, url).await {
                Ok(record) => {
                    info!(index = i, %url, title = %record.title, "Processed article");
                    ArticleOutcome {
                        record,
                        error: None,
                    }
                }
                Err(e) => {
                    error!(
                        index = i,
                        %url,
                        status = ?e.status(),
                        timeout = e.is_timeout(),
                        error = %e,
                        "Failed to process article"
                    );
                    ArticleOutcome {
                        record: ArticleRecord::error(url, &e),
                        error: Some(e),
                    }
                }
            }
        })
        .collect()
        .await;

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    info!(
        total = outcomes.len(),
        successful = outcomes.len() - failed,
        failed,
        "Completed article processing"
    );
    outcomes
}

/// Fetch and analyze a single address.
#[instrument(level = "debug", skip(source, policy))]
pub async fn process_article<S>(
    source: &S,
    policy: &CompiledPolicy,
    url: &str,
) -> Result<ArticleRecord, FetchError>
where
    S: PageSource,
{
    let html = source.fetch_page(url).await?;
    Ok(extract_from_html(&html, url, policy))
}
