//! Error types for the harvest pipeline.
//!
//! All fallible public APIs in this crate return [`Result`], an alias over
//! [`HarvestError`]. Fetch failures during pagination discovery are
//! deliberately NOT represented here: during discovery an unreachable page
//! is a control signal that fixes the page count, never an error.

use thiserror::Error;

/// The error type for the harvest pipeline and its CSV sink.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// A transport-level failure (refused connection, timeout, DNS) while
    /// harvesting a page. Fatal: the run aborts and no output is written.
    #[error("failed to fetch page {page} ({url}): {source}")]
    Fetch {
        /// 1-based index of the page whose fetch failed.
        page: usize,
        /// The URL that was requested.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A quote container is missing a required child node. Extraction
    /// logs and skips the offending container; this never aborts a run.
    #[error("quote container missing required `{field}` node")]
    MalformedQuote { field: &'static str },

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to encode tags: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Create a fetch error for the given page.
    pub fn fetch(page: usize, url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            page,
            url: url.into(),
            source,
        }
    }

    /// Create a malformed-quote error naming the missing node.
    pub fn malformed(field: &'static str) -> Self {
        Self::MalformedQuote { field }
    }
}

/// Result type alias for the harvest pipeline.
pub type Result<T> = std::result::Result<T, HarvestError>;
