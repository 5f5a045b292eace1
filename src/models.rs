//! Data models for harvested quotes.
//!
//! This module defines the core data structure used throughout the
//! application: [`Quote`], one structured record extracted from a page of
//! the paginated listing. The complete dataset is simply `Vec<Quote>` in
//! (page index, in-page position) order — that ordering is the only
//! consistency guarantee the harvester makes.

use serde::{Deserialize, Serialize};

/// One quote as extracted from a listing page.
///
/// A `Quote` is immutable once constructed and owns its `tags` vector
/// exclusively — tags are never shared or deduplicated across records.
///
/// # Fields
///
/// * `text` - The quote body, non-empty.
/// * `author` - The attribution line, non-empty.
/// * `tags` - Topic tags in document order; duplicates are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quote {
    /// The quote body.
    pub text: String,
    /// The attributed author.
    pub author: String,
    /// Topic tags, in the order they appear in the markup.
    pub tags: Vec<String>,
}
