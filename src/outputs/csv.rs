//! CSV output for harvested quotes.
//!
//! Serializes the complete ordered dataset to a delimited text file:
//! a `text,author,tags` header line followed by one row per quote.
//!
//! # Field Encoding
//!
//! Fields containing a comma, double quote, CR or LF are wrapped in
//! double quotes with embedded quotes doubled, per CSV convention. The
//! `tags` field is rendered as a JSON array string (`["life","love"]`),
//! so any conventional CSV reader gets a single cell that `serde_json`
//! parses back into the original ordered sequence.

use crate::error::Result;
use crate::models::Quote;
use tokio::fs;
use tracing::{info, instrument};

const HEADER: [&str; 3] = ["text", "author", "tags"];

fn needs_quoting(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Append one CSV row, CRLF-terminated.
fn push_row(out: &mut String, fields: &[&str]) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        } else {
            first = false;
        }
        if needs_quoting(field) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}

/// Render the full CSV document for a dataset.
fn render_csv(quotes: &[Quote]) -> Result<String> {
    let mut out = String::new();
    push_row(&mut out, &HEADER);
    for quote in quotes {
        let tags = serde_json::to_string(&quote.tags)?;
        push_row(
            &mut out,
            &[quote.text.as_str(), quote.author.as_str(), tags.as_str()],
        );
    }
    Ok(out)
}

/// Write the complete dataset to a CSV file at `path`.
///
/// The document is rendered in memory and persisted with a single write,
/// so an aborted run leaves no partial file behind.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
#[instrument(level = "info", skip(quotes), fields(path = %path))]
pub async fn write_quotes(path: &str, quotes: &[Quote]) -> Result<()> {
    let csv = render_csv(quotes)?;
    fs::write(path, csv).await?;
    info!(path, rows = quotes.len(), "Wrote quotes CSV");
    Ok(())
}
