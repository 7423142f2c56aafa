//! Raw source records.
//!
//! Records are immutable once fetched. Field names follow the landing zone
//! file formats written by the scraper and the enricher.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::loose;

/// Origin of a source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Goodreads,
    GoogleBooks,
}

impl SourceTag {
    /// Machine name stored in the `fuente` columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goodreads => "goodreads",
            Self::GoogleBooks => "google_books",
        }
    }

    /// Human readable name used in quality reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Goodreads => "Goodreads",
            Self::GoogleBooks => "Google Books",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book scraped from the Goodreads search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodreadsRecord {
    #[serde(default, deserialize_with = "loose::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "loose::float")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "loose::count")]
    pub ratings_count: Option<u64>,
    #[serde(default, deserialize_with = "loose::text")]
    pub book_url: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub isbn10: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub isbn13: Option<String>,
}

impl GoodreadsRecord {
    pub const SOURCE: SourceTag = SourceTag::Goodreads;
}

/// A volume returned by the Google Books API, flattened for the landing zone.
///
/// `authors` and `categories` are comma-joined lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleBooksRecord {
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub gb_id: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub authors: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub pub_date: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub categories: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub isbn13: Option<String>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub isbn10: Option<String>,
    #[serde(default, deserialize_with = "loose::float")]
    pub price_amount: Option<f64>,
    #[serde(default, deserialize_with = "loose::blank_text")]
    pub price_currency: Option<String>,
}

impl GoogleBooksRecord {
    pub const SOURCE: SourceTag = SourceTag::GoogleBooks;
}
