//! Quote listing scraper.
//!
//! This module scrapes quote records from a paginated public listing that
//! follows the [quotes.toscrape.com](https://quotes.toscrape.com) markup
//! convention: each page carries zero or more `div.quote` containers, and
//! a `li.next a` anchor whenever a successor page exists.
//!
//! # URL Pattern
//!
//! Page `n` lives at `{base_url}page/{n}/`. The site also serves page 1 at
//! the bare base URL, which is what the harvester fetches for page 1.
//!
//! # Operations
//!
//! - [`extract_quotes`]: pure per-page extraction from parsed markup
//! - [`discover_page_count`]: sequential probe for the pagination boundary
//! - [`harvest_quotes`]: fetch every page in order into one dataset

use crate::error::{HarvestError, Result};
use crate::models::Quote;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

static QUOTE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.quote").unwrap());
static TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span.text").unwrap());
static AUTHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("small.author").unwrap());
static TAG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.tag").unwrap());
static NEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li.next a").unwrap());

/// Extract all quotes from one page's parsed document.
///
/// Walks every `div.quote` container in document order and pulls out the
/// quote body (`span.text`), attribution (`small.author`) and topic tags
/// (`a.tag`, all matches, document order). A container missing its body
/// or attribution is logged with a bounded markup preview and skipped;
/// the rest of the page is unaffected.
///
/// Pure function of its input: no network, no I/O, the document tree is
/// not mutated.
pub fn extract_quotes(document: &Html) -> Vec<Quote> {
    let mut quotes = Vec::new();
    for container in document.select(&QUOTE_SELECTOR) {
        match parse_quote(container) {
            Ok(quote) => quotes.push(quote),
            Err(e) => {
                warn!(
                    error = %e,
                    markup = %truncate_for_log(&container.html(), 200),
                    "Skipping malformed quote container"
                );
            }
        }
    }
    quotes
}

/// Parse a single `div.quote` container into a [`Quote`].
fn parse_quote(container: ElementRef<'_>) -> Result<Quote> {
    let text = container
        .select(&TEXT_SELECTOR)
        .next()
        .ok_or_else(|| HarvestError::malformed("text"))?;
    let author = container
        .select(&AUTHOR_SELECTOR)
        .next()
        .ok_or_else(|| HarvestError::malformed("author"))?;

    Ok(Quote {
        text: element_text(text),
        author: element_text(author),
        tags: container.select(&TAG_SELECTOR).map(element_text).collect(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Build the URL for a 1-based page index.
fn page_url(base_url: &str, page: usize) -> String {
    format!("{}/page/{}/", base_url.trim_end_matches('/'), page)
}

/// Fetch one page body.
///
/// `Ok(None)` means the server answered with a non-success status ("no
/// such page"); `Err` is a transport-level failure. Callers decide what
/// each means — during discovery both are end-of-data signals, during
/// harvesting they diverge.
async fn fetch_page(
    client: &Client,
    url: &str,
) -> std::result::Result<Option<String>, reqwest::Error> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        debug!(%url, status = %response.status(), "Non-success status");
        return Ok(None);
    }
    Ok(Some(response.text().await?))
}

/// Discover how many pages the listing has.
///
/// Probes `{base_url}page/{p}/` for `p = 1, 2, ...` and inspects each
/// response for the `li.next a` affordance. Halts on the first page
/// without one, or on the first failed fetch. Exactly `count` requests
/// are made when termination is by missing affordance.
///
/// A failed fetch at `p` returns `p` as-is: the previous page's
/// affordance promised that `p` exists, and the harvester absorbs a
/// phantom last page as an empty one. A failure on the very first probe
/// yields 1 — no data is guaranteed reachable, and callers must handle
/// an empty dataset.
///
/// Fetch failures here are control signals, never errors, and are never
/// retried.
#[instrument(level = "info", skip(client))]
pub async fn discover_page_count(client: &Client, base_url: &str) -> usize {
    let mut pages = 1;
    loop {
        let url = page_url(base_url, pages);
        let body = match fetch_page(client, &url).await {
            Ok(Some(body)) => body,
            Ok(None) => break,
            Err(e) => {
                debug!(%url, error = %e, "Probe fetch failed; ending discovery");
                break;
            }
        };

        let has_next = {
            let document = Html::parse_document(&body);
            document.select(&NEXT_SELECTOR).next().is_some()
        };
        if !has_next {
            break;
        }
        pages += 1;
    }

    info!(pages, "Discovered page count");
    pages
}

/// Harvest every reachable page of the listing into one ordered dataset.
///
/// Fetches and extracts page 1 from the bare base URL, asks
/// [`discover_page_count`] for the total count `N`, then fetches, parses
/// and appends pages `2..=N` in strictly increasing order. Records keep
/// (page index, in-page position) order; nothing is deduplicated or
/// reordered.
///
/// # Errors
///
/// A transport-level failure on any page is fatal and surfaces as
/// [`HarvestError::Fetch`] naming the page and cause. A non-success
/// status yields an empty page instead: the listing's own error pages
/// contain no quote containers, and this is also how the phantom page a
/// stale affordance promised gets absorbed without aborting the run.
#[instrument(level = "info", skip(client))]
pub async fn harvest_quotes(client: &Client, base_url: &str) -> Result<Vec<Quote>> {
    let mut quotes = harvest_page(client, 1, base_url).await?;
    debug!(count = quotes.len(), "Extracted quotes from first page");

    let page_count = discover_page_count(client, base_url).await;

    for page in 2..=page_count {
        let url = page_url(base_url, page);
        let page_quotes = harvest_page(client, page, &url).await?;
        debug!(page, count = page_quotes.len(), "Extracted quotes from page");
        quotes.extend(page_quotes);
    }

    info!(count = quotes.len(), pages = page_count, "Harvested all pages");
    Ok(quotes)
}

/// Fetch one page during harvesting and extract its quotes.
async fn harvest_page(client: &Client, page: usize, url: &str) -> Result<Vec<Quote>> {
    let body = match fetch_page(client, url).await {
        Ok(Some(body)) => body,
        Ok(None) => {
            warn!(page, %url, "Page returned a non-success status; treating as empty");
            return Ok(Vec::new());
        }
        Err(source) => return Err(HarvestError::fetch(page, url, source)),
    };

    // The document tree is scoped to this one extraction and dropped
    // before the caller's next fetch.
    let document = Html::parse_document(&body);
    Ok(extract_quotes(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quote_div(text: &str, author: &str, tags: &[&str]) -> String {
        let tag_markup: String = tags
            .iter()
            .map(|t| format!("<a class=\"tag\" href=\"/tag/{t}/\">{t}</a>"))
            .collect();
        format!(
            "<div class=\"quote\">\
             <span class=\"text\">{text}</span>\
             <span>by <small class=\"author\">{author}</small></span>\
             <div class=\"tags\">{tag_markup}</div>\
             </div>"
        )
    }

    fn page_html(quote_divs: &[String], has_next: bool) -> String {
        let pager = if has_next {
            "<nav><ul class=\"pager\"><li class=\"next\"><a href=\"/page/2/\">Next</a></li></ul></nav>"
        } else {
            "<nav><ul class=\"pager\"></ul></nav>"
        };
        format!(
            "<html><body><div class=\"col-md-8\">{}{pager}</div></body></html>",
            quote_divs.concat()
        )
    }

    async fn mount_page(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_extract_quotes_in_document_order() {
        let html = page_html(
            &[
                quote_div("First.", "Alpha", &["one"]),
                quote_div("Second.", "Beta", &[]),
                quote_div("Third.", "Gamma", &["three", "iii"]),
            ],
            false,
        );
        let document = Html::parse_document(&html);

        let quotes = extract_quotes(&document);

        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].text, "First.");
        assert_eq!(quotes[1].author, "Beta");
        assert_eq!(quotes[1].tags, Vec::<String>::new());
        assert_eq!(quotes[2].tags, vec!["three", "iii"]);
    }

    #[test]
    fn test_extract_quotes_empty_document() {
        let document = Html::parse_document("<html><body></body></html>");
        assert!(extract_quotes(&document).is_empty());
    }

    #[test]
    fn test_extract_quotes_keeps_duplicate_tags() {
        let html = page_html(&[quote_div("Echo.", "Narcissus", &["echo", "echo"])], false);
        let document = Html::parse_document(&html);

        let quotes = extract_quotes(&document);

        assert_eq!(quotes[0].tags, vec!["echo", "echo"]);
    }

    #[test]
    fn test_extract_quotes_skips_malformed_container() {
        // Second container has no author node; the other two survive.
        let malformed =
            "<div class=\"quote\"><span class=\"text\">Orphaned.</span></div>".to_string();
        let html = page_html(
            &[
                quote_div("Kept.", "Alpha", &[]),
                malformed,
                quote_div("Also kept.", "Beta", &[]),
            ],
            false,
        );
        let document = Html::parse_document(&html);

        let quotes = extract_quotes(&document);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "Kept.");
        assert_eq!(quotes[1].text, "Also kept.");
    }

    #[test]
    fn test_parse_quote_names_missing_field() {
        let html = page_html(
            &["<div class=\"quote\"><small class=\"author\">Nobody</small></div>".to_string()],
            false,
        );
        let document = Html::parse_document(&html);
        let container = document.select(&QUOTE_SELECTOR).next().unwrap();

        let err = parse_quote(container).unwrap_err();
        assert!(matches!(
            err,
            HarvestError::MalformedQuote { field: "text" }
        ));
    }

    #[test]
    fn test_page_url_tolerates_trailing_slash() {
        assert_eq!(page_url("http://q.example/", 3), "http://q.example/page/3/");
        assert_eq!(page_url("http://q.example", 3), "http://q.example/page/3/");
    }

    #[tokio::test]
    async fn test_discover_single_page_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page/1/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page_html(&[quote_div("Only.", "Solo", &[])], false)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let count = discover_page_count(&Client::new(), &server.uri()).await;
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_discover_counts_pages_with_one_fetch_each() {
        let server = MockServer::start().await;
        for (page, has_next) in [(1, true), (2, true), (3, false)] {
            Mock::given(method("GET"))
                .and(path(format!("/page/{page}/")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_string(page_html(&[], has_next)),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let count = discover_page_count(&Client::new(), &server.uri()).await;
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_discover_first_fetch_not_found() {
        // No mounted routes: every request answers 404.
        let server = MockServer::start().await;

        let count = discover_page_count(&Client::new(), &server.uri()).await;
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_discover_first_fetch_unreachable() {
        // Nothing listens on port 1; the connection is refused outright.
        let count = discover_page_count(&Client::new(), "http://127.0.0.1:1").await;
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_harvest_concatenates_pages_in_order() {
        let server = MockServer::start().await;
        let page1 = page_html(
            &[
                quote_div("One.", "A", &["t1"]),
                quote_div("Two.", "B", &[]),
            ],
            true,
        );
        let page2 = page_html(
            &[
                quote_div("Three.", "C", &[]),
                quote_div("Four.", "D", &["t4", "t4b"]),
                quote_div("Five.", "E", &[]),
            ],
            true,
        );
        let page3 = page_html(&[quote_div("Six.", "F", &[])], false);

        mount_page(&server, "/", page1.clone()).await;
        mount_page(&server, "/page/1/", page1).await;
        mount_page(&server, "/page/2/", page2).await;
        mount_page(&server, "/page/3/", page3).await;

        let quotes = harvest_quotes(&Client::new(), &server.uri()).await.unwrap();

        assert_eq!(quotes.len(), 6);
        let texts: Vec<&str> = quotes.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["One.", "Two.", "Three.", "Four.", "Five.", "Six."]);
        assert_eq!(quotes[3].tags, vec!["t4", "t4b"]);
    }

    #[tokio::test]
    async fn test_harvest_absorbs_phantom_last_page() {
        // The true last page still advertises a successor; its fetch 404s.
        let server = MockServer::start().await;
        let page1 = page_html(&[quote_div("One.", "A", &[]), quote_div("Two.", "B", &[])], true);
        let page2 = page_html(&[quote_div("Three.", "C", &[])], true);

        mount_page(&server, "/", page1.clone()).await;
        mount_page(&server, "/page/1/", page1).await;
        mount_page(&server, "/page/2/", page2).await;

        let quotes = harvest_quotes(&Client::new(), &server.uri()).await.unwrap();

        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[2].text, "Three.");
    }

    #[tokio::test]
    async fn test_harvest_transport_failure_is_fatal() {
        // Page 2 hangs past the client timeout, which reqwest surfaces as
        // a transport error rather than a status.
        let server = MockServer::start().await;
        let page1 = page_html(&[quote_div("One.", "A", &[])], true);

        mount_page(&server, "/", page1.clone()).await;
        mount_page(&server, "/page/1/", page1).await;
        Mock::given(method("GET"))
            .and(path("/page/2/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page_html(&[], false))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();

        let err = harvest_quotes(&client, &server.uri()).await.unwrap_err();
        assert!(matches!(err, HarvestError::Fetch { page: 2, .. }));
    }

    #[tokio::test]
    async fn test_harvest_empty_listing() {
        // Page 1 exists but carries no containers and no affordance.
        let server = MockServer::start().await;
        let page1 = page_html(&[], false);

        mount_page(&server, "/", page1.clone()).await;
        mount_page(&server, "/page/1/", page1).await;

        let quotes = harvest_quotes(&Client::new(), &server.uri()).await.unwrap();
        assert!(quotes.is_empty());
    }
}
