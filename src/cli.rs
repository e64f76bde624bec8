//! Command-line interface definitions.
//!
//! Every option has a default, so running the binary with no arguments
//! processes the built-in article list with the standard timeout and pause.
//! Options can also be supplied through environment variables.

use std::path::PathBuf;

use clap::Parser;

use crate::scrapers::fetch::DEFAULT_TIMEOUT;

/// Articles processed when no addresses are given on the command line.
pub const DEFAULT_ARTICLE_URLS: [&str; 5] = [
    "https://www.thenationalnews.com/travel/2025/07/26/anandes-hotel-mykonos-review-greece-island/",
    "https://www.thenationalnews.com/travel/2025/07/17/visiting-uae-during-summer-everything-tourists-need-to-know/",
    "https://www.thenationalnews.com/travel/2025/07/22/chatham-inn-cape-cod-hotel-review/",
    "https://www.thenationalnews.com/travel/2025/07/24/best-staycation-deals-uae-summer-2025/",
    "https://www.thenationalnews.com/travel/2025/07/24/shenzhen-china-destination-museums-parks-technology-halal-dining/",
];

/// Fetch news articles and print their structural metadata as a table.
///
/// # Examples
///
/// ```sh
/// # The built-in article list
/// news_article_stats
///
/// # Other pages, faster, with a custom policy and a JSON copy
/// news_article_stats --delay-secs 0 --policy site.yaml --json-output out/report.json \
///     https://example.com/a https://example.com/b
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article URLs to process (defaults to the built-in list)
    pub urls: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "ARTICLE_STATS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Pause between consecutive articles in seconds
    #[arg(long, env = "ARTICLE_STATS_DELAY_SECS", default_value_t = 2)]
    pub delay_secs: u64,

    /// YAML file overriding the extraction heuristics
    #[arg(short, long, env = "ARTICLE_STATS_POLICY")]
    pub policy: Option<PathBuf>,

    /// Also write the records as JSON to this file
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,
}

impl Cli {
    /// The addresses to process, in order.
    pub fn article_urls(&self) -> Vec<String> {
        if self.urls.is_empty() {
            DEFAULT_ARTICLE_URLS.iter().map(|u| u.to_string()).collect()
        } else {
            self.urls.clone()
        }
    }
}
