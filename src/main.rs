//! # News Article Stats
//!
//! Fetches a list of news article pages, extracts structural metadata from
//! each one and prints the results as a grid table.
//!
//! ## Usage
//!
//! ```sh
//! news_article_stats
//! RUST_LOG=debug news_article_stats https://example.com/story
//! ```
//!
//! ## Architecture
//!
//! The application is a strictly sequential pipeline:
//! 1. **Fetching**: one GET per address, fixed timeout and headers
//! 2. **Extraction**: title, word/paragraph/image counts, most common word, tags
//! 3. **Collection**: one record per address, failures become error rows
//! 4. **Output**: grid table on stdout, optional JSON report
//!
//! Logs go to stderr so stdout carries only the table.

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use outputs::{json, table};
use scrapers::{ExtractionPolicy, HttpFetcher};

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_article_stats starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let policy = match &args.policy {
        Some(path) => ExtractionPolicy::load(path)?,
        None => ExtractionPolicy::default(),
    };
    let policy = policy.compile()?;

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let urls = args.article_urls();
    info!(count = urls.len(), "Processing articles");

    let records = pipeline::collect_records(
        &fetcher,
        &policy,
        &urls,
        Duration::from_secs(args.delay_secs),
    )
    .await;

    table::print_table(&records)?;

    if let Some(path) = &args.json_output {
        if let Err(e) = json::write_report(&records, path).await {
            error!(path = %path.display(), error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
