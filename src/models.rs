//! Data model for per-article extraction results.
//!
//! Every processed address yields exactly one [`ArticleRecord`]. A record is
//! either built from page content (possibly degraded when the page has no
//! recognizable body region) or is an error record standing in for a failed
//! fetch. Records are never mutated once built.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::utils::truncate_chars;

/// Title used when the page has no first-level heading.
pub const NO_TITLE: &str = "No title";
/// `common_word` when no token survives stop-word filtering, or on error.
pub const NOT_AVAILABLE: &str = "N/A";
/// `tags` when the body region was found but no tag labels were.
pub const NO_TAGS: &str = "No tags";
/// `tags` when the body region could not be located.
pub const NOT_FOUND: &str = "Not found";
/// `tags` for an address that failed to fetch.
pub const ERROR_TAGS: &str = "Error";

/// Number of characters of the error text kept in an error record's title.
pub const ERROR_TITLE_CHARS: usize = 50;

/// Structural metadata extracted from one article page.
///
/// Field order matches the column order of the rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// First `<h1>` text, [`NO_TITLE`], or `"Error: …"` for error records.
    pub title: String,
    /// The source address, exactly as given.
    pub url: String,
    /// Number of word tokens in the body's paragraphs (before stop-word removal).
    pub word_count: usize,
    /// Number of non-empty paragraphs in the body region.
    pub paragraph_count: usize,
    /// Number of `<img>` elements in the body region.
    pub image_count: usize,
    /// Most frequent token after stop-word removal.
    pub common_word: String,
    /// Comma-joined tag labels, or a sentinel.
    pub tags: String,
}

impl ArticleRecord {
    /// Record for a page whose body region could not be located.
    ///
    /// The title is still taken from the page; everything else is zeroed.
    pub fn body_not_found(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            word_count: 0,
            paragraph_count: 0,
            image_count: 0,
            common_word: NOT_AVAILABLE.to_string(),
            tags: NOT_FOUND.to_string(),
        }
    }

    /// Record substituted for an address that could not be processed.
    pub fn error(url: impl Into<String>, err: &impl Display) -> Self {
        let message = err.to_string();
        Self {
            title: format!("Error: {}", truncate_chars(&message, ERROR_TITLE_CHARS)),
            url: url.into(),
            word_count: 0,
            paragraph_count: 0,
            image_count: 0,
            common_word: NOT_AVAILABLE.to_string(),
            tags: ERROR_TAGS.to_string(),
        }
    }
}
