//! Scrapers for paginated quote listings.
//!
//! Each scraper module follows a consistent three-operation pattern:
//!
//! 1. **Extraction**: Turn one page's parsed markup into ordered records
//! 2. **Discovery**: Walk the pagination sequentially to find the page count
//! 3. **Harvesting**: Fetch every page in order and concatenate the records
//!
//! # Supported Listings
//!
//! | Listing | Module | Markup contract |
//! |---------|--------|-----------------|
//! | quotes.toscrape.com convention | [`quotes`] | `div.quote` containers, `li.next a` pagination |
//!
//! Scrapers use:
//! - Strictly sequential fetching — a page count is only knowable by
//!   probing pages one at a time, so nothing is gained by parallelism
//! - Fetch failures during discovery as end-of-data signals, never errors
//! - Graceful handling of inconsistent markup (malformed containers are
//!   logged and skipped)

pub mod quotes;
