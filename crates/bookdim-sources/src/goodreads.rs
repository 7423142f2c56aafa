//! Goodreads search scraper.
//!
//! Walks the search result pages for a query, reads title, author and the
//! "minirating" summary from each result row, then visits every book page to
//! pick up its ISBN. Pages are fetched sequentially with polite pauses.

use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use bookdim_model::{GoodreadsRecord, ScrapeConfig};

use crate::http::PageFetcher;

pub const GOODREADS_BASE_URL: &str = "https://www.goodreads.com";

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d\.\d+)").expect("valid rating regex"));
static RATINGS_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:,\d{3})*)\s+ratings").expect("valid ratings count regex")
});
static PAGE_ISBN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ISBN(?:13)?:?\s*(\d{10,13})").expect("valid isbn regex"));

static BOOK_ROW: LazyLock<Selector> = LazyLock::new(|| selector(r#"tr[itemtype="http://schema.org/Book"]"#));
static BOOK_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("a.bookTitle"));
static AUTHOR_NAME: LazyLock<Selector> = LazyLock::new(|| selector("a.authorName"));
static MINIRATING: LazyLock<Selector> = LazyLock::new(|| selector("span.minirating"));
static JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"script[type="application/ld+json"]"#));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

/// One book row of a search result page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub author: String,
    pub book_url: String,
    pub rating: Option<f64>,
    pub ratings_count: Option<u64>,
}

/// Search URL for `query` (spaces become `+`) and a 1-based page number.
pub fn search_url(base_url: &str, query: &str, page: u32) -> String {
    format!("{base_url}/search?q={}&page={page}", query.replace(' ', "+"))
}

/// Extract the book rows of a search result page.
///
/// Rows missing a title link, an author link or a rating summary are skipped.
pub fn parse_search_page(html: &str, base_url: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    document
        .select(&BOOK_ROW)
        .filter_map(|row| {
            let title_link = row.select(&BOOK_TITLE).next()?;
            let author_link = row.select(&AUTHOR_NAME).next()?;
            let minirating = row.select(&MINIRATING).next()?;
            let href = title_link.value().attr("href").unwrap_or_default();
            let (rating, ratings_count) = parse_minirating(&stripped_text(minirating));
            Some(SearchHit {
                title: stripped_text(title_link),
                author: stripped_text(author_link),
                book_url: format!("{base_url}{href}"),
                rating,
                ratings_count,
            })
        })
        .collect()
}

/// Concatenate the trimmed text nodes of an element.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Average rating and ratings count from a text like
/// `"4.37 avg rating — 23,456 ratings"`.
pub fn parse_minirating(text: &str) -> (Option<f64>, Option<u64>) {
    let rating = RATING_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    let ratings_count = RATINGS_COUNT_RE
        .captures(text)
        .and_then(|caps| caps[1].replace(',', "").parse::<u64>().ok());
    (rating, ratings_count)
}

/// ISBN-10 and ISBN-13 found on a book page.
///
/// The JSON-LD `isbn` property is preferred; otherwise the first
/// `ISBN: <digits>` mention in the page text is used. A 10-digit value is
/// reported as ISBN-10, anything else as ISBN-13.
pub fn parse_book_isbns(html: &str) -> (Option<String>, Option<String>) {
    let document = Html::parse_document(html);
    let structured = document
        .select(&JSON_LD)
        .next()
        .and_then(|script| json_ld_isbn(&script.text().collect::<String>()));

    let found = structured.or_else(|| {
        PAGE_ISBN_RE
            .captures(html)
            .map(|caps| caps[1].to_string())
            .filter(|isbn| isbn.len() == 10 || isbn.len() == 13)
    });

    match found {
        Some(isbn) if isbn.len() == 10 => (Some(isbn), None),
        Some(isbn) => (None, Some(isbn)),
        None => (None, None),
    }
}

fn json_ld_isbn(script: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(script).ok()?;
    match value.get("isbn")? {
        serde_json::Value::String(isbn) if !isbn.trim().is_empty() => Some(isbn.trim().to_string()),
        serde_json::Value::Number(isbn) => Some(isbn.to_string()),
        _ => None,
    }
}

/// Scraper bound to a page fetcher and a Goodreads base URL.
pub struct GoodreadsScraper<F> {
    fetcher: F,
    base_url: String,
    /// Pause after each book page.
    book_delay: Duration,
    /// Pause after each search result page.
    page_delay: Duration,
}

impl<F: PageFetcher> GoodreadsScraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: GOODREADS_BASE_URL.to_string(),
            book_delay: Duration::from_secs(1),
            page_delay: Duration::from_secs(2),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_delays(mut self, book_delay: Duration, page_delay: Duration) -> Self {
        self.book_delay = book_delay;
        self.page_delay = page_delay;
        self
    }

    /// Collect up to `config.max_results` books for `config.query`.
    ///
    /// Stops early when a search page cannot be fetched or has no book rows.
    /// A book page that cannot be fetched yields a record without ISBNs.
    pub fn scrape(&self, config: &ScrapeConfig) -> Vec<GoodreadsRecord> {
        let mut records = Vec::with_capacity(config.max_results);
        let mut page = 1u32;

        while records.len() < config.max_results {
            let url = search_url(&self.base_url, &config.query, page);
            info!(page, url = %url, "scraping search page");
            let html = match self.fetcher.fetch_text(&url) {
                Ok(html) => html,
                Err(error) => {
                    warn!(page, error = %error, "search page unavailable, stopping");
                    break;
                }
            };

            let hits = parse_search_page(&html, &self.base_url);
            if hits.is_empty() {
                debug!(page, "no book rows on search page, stopping");
                break;
            }

            for hit in hits {
                if records.len() >= config.max_results {
                    break;
                }
                records.push(self.book_record(hit));
                pause(self.book_delay);
            }

            page += 1;
            pause(self.page_delay);
        }

        info!(query = %config.query, books = records.len(), "scrape finished");
        records
    }

    fn book_record(&self, hit: SearchHit) -> GoodreadsRecord {
        debug!(title = %hit.title, "fetching book details");
        let (isbn10, isbn13) = match self.fetcher.fetch_text(&hit.book_url) {
            Ok(html) => parse_book_isbns(&html),
            Err(error) => {
                warn!(url = %hit.book_url, error = %error, "book page unavailable");
                (None, None)
            }
        };
        GoodreadsRecord {
            title: Some(hit.title),
            author: Some(hit.author),
            rating: hit.rating,
            ratings_count: hit.ratings_count,
            book_url: Some(hit.book_url),
            isbn10,
            isbn13,
        }
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
