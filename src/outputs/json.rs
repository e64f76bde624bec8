//! JSON report of the collected records.
//!
//! The report wraps the records with the time they were produced:
//!
//! ```json
//! {
//!   "generated_at": "2025-07-28T09:14:02.512+00:00",
//!   "articles": [ { "title": "…", "url": "…", "word_count": 512, … } ]
//! }
//! ```

use std::error::Error;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::ArticleRecord;

/// Serialized form of a run's output.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub articles: Vec<ArticleRecord>,
}

/// Write `records` as a pretty-printed JSON report to `path`.
///
/// Missing parent directories are created.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_report(
    records: &[ArticleRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let report = Report {
        generated_at: Utc::now(),
        articles: records.to_vec(),
    };
    let json = serde_json::to_string_pretty(&report)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(articles = records.len(), "Wrote JSON report");
    Ok(())
}
