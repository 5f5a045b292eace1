//! # Awful Quote Harvest
//!
//! Harvests quote records from a paginated public HTML listing and
//! materializes them as a flat CSV dataset.
//!
//! ## Features
//!
//! - Discovers the pagination boundary by probing pages sequentially for
//!   a "next page" affordance — no a priori page count needed
//! - Extracts structured records (`text`, `author`, `tags`) from each
//!   page's markup via CSS selectors
//! - Concatenates per-page results preserving page order and within-page
//!   order, then writes a single CSV file
//!
//! ## Usage
//!
//! ```sh
//! awful_quote_harvest -o quotes.csv -b https://quotes.toscrape.com/
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Discovery**: Walk the pagination to find the total page count
//! 2. **Harvesting**: Fetch and extract every page, strictly in order
//! 3. **Output**: Write the complete dataset as CSV
//!
//! All fetches are sequential by design: the page count is only knowable
//! by probing one page at a time, so the run either produces a complete
//! file for all reachable pages or fails with the offending page named.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use url::Url;

mod cli;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use error::HarvestError;
use outputs::csv;
use scrapers::quotes::harvest_quotes;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("quote_harvest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_csv_path, ?args.base_url, args.timeout_secs, "Parsed CLI arguments");

    // Validate the base URL before touching the network.
    let base_url = match Url::parse(&args.base_url) {
        Ok(url) => url,
        Err(e) => {
            error!(base_url = %args.base_url, error = %e, "Base URL is not a valid URL");
            return Err(HarvestError::from(e).into());
        }
    };

    // Early check: ensure the output directory is writable, so a full
    // harvest never completes only to fail at the sink.
    let output_dir = Path::new(&args.output_csv_path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(
            path = %output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    // ---- Harvest ----
    let quotes = match harvest_quotes(&client, base_url.as_str()).await {
        Ok(quotes) => quotes,
        Err(e) => {
            error!(error = %e, "Harvest failed; no output written");
            return Err(e.into());
        }
    };
    info!(count = quotes.len(), "Harvest complete");

    // ---- CSV output ----
    if let Err(e) = csv::write_quotes(&args.output_csv_path, &quotes).await {
        error!(path = %args.output_csv_path, error = %e, "Failed writing CSV");
        return Err(e.into());
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
