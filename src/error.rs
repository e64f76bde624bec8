//! Error types for fetching pages and loading extraction policies.
//!
//! Only [`FetchError`] ever reaches the pipeline's per-article error
//! boundary; extraction itself never fails. [`PolicyError`] is a startup
//! failure and aborts the run before any address is fetched.

use std::error::Error as StdError;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level failure while retrieving one page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The address is not an absolute URL.
    #[error("{source} for url: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The server answered with a non-success status.
    #[error("{status} for url: {url}")]
    Status { url: String, status: StatusCode },

    /// DNS, connection, timeout, or body read failure.
    #[error("{} for url: {url}", describe_cause(source))]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// HTTP status carried by the error, if the server responded at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}

/// The innermost two links of `err`'s source chain, joined with `": "`.
///
/// reqwest's own message only repeats the URL; the cause (DNS failure,
/// refused connection, timeout) sits further down the chain.
fn describe_cause(err: &(dyn StdError + 'static)) -> String {
    let mut chain = Vec::new();
    let mut next = err.source();
    while let Some(cause) = next {
        chain.push(cause.to_string());
        next = cause.source();
    }
    if chain.is_empty() {
        return err.to_string();
    }
    let start = chain.len().saturating_sub(2);
    chain[start..].join(": ")
}

/// Failure to load or compile an extraction policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid policy YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid selector in rule `{rule}`: {message}")]
    Selector { rule: String, message: String },

    #[error("invalid class pattern: {0}")]
    Pattern(#[from] regex::Error),
}
