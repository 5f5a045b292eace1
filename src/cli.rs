//! Command-line interface definitions for Awful Quote Harvest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the Awful Quote Harvest application.
///
/// This struct defines all configuration options that can be passed to the
/// application at runtime: the output file path, the listing's base URL,
/// and the per-request timeout.
///
/// # Examples
///
/// ```sh
/// # Basic usage, writes ./quotes.csv
/// awful_quote_harvest
///
/// # Custom output path and source
/// awful_quote_harvest -o /tmp/quotes.csv -b https://quotes.toscrape.com/
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output path for the quotes CSV file
    #[arg(short, long, default_value = "quotes.csv")]
    pub output_csv_path: String,

    /// Base URL of the paginated quote listing
    #[arg(short, long, default_value = "https://quotes.toscrape.com/")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
