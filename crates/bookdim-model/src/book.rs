//! Integration-stage records: merged, normalized and canonical books.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::BookId;
use crate::record::{GoodreadsRecord, GoogleBooksRecord};

/// A Goodreads record joined with at most one Google Books record.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub goodreads: GoodreadsRecord,
    pub google_books: Option<GoogleBooksRecord>,
    /// When the join was performed (`ts_ingesta`).
    pub ingested_at: DateTime<Utc>,
}

impl MergedRecord {
    pub fn has_google_match(&self) -> bool {
        self.google_books.is_some()
    }

    /// Read a Google Books field, `None` when the record is unmatched.
    pub fn google_field<'a>(
        &'a self,
        field: impl FnOnce(&'a GoogleBooksRecord) -> Option<&'a String>,
    ) -> Option<&'a str> {
        self.google_books.as_ref().and_then(field).map(String::as_str)
    }
}

/// Survivorship rank of a record within a `book_id` group; lower wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourcePriority {
    /// The Goodreads record was matched to a Google Books record.
    GoogleBooksMatched = 1,
    /// Only Goodreads data is available.
    GoodreadsOnly = 2,
}

impl SourcePriority {
    pub fn of(record: &MergedRecord) -> Self {
        if record.has_google_match() {
            Self::GoogleBooksMatched
        } else {
            Self::GoodreadsOnly
        }
    }
}

/// A merged record after field-level cleaning.
///
/// Every cleaned field is either valid or `None`; invalid and absent source
/// values are indistinguishable at this stage.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub merged: MergedRecord,
    pub isbn13: Option<String>,
    pub isbn10: Option<String>,
    /// ISO 8601 `YYYY-MM-DD`.
    pub pub_date: Option<String>,
    pub pub_year: Option<i32>,
    /// BCP-47 shaped language code.
    pub language: Option<String>,
    /// ISO 4217 shaped currency code.
    pub currency: Option<String>,
    pub title: Option<String>,
    pub normalized_title: Option<String>,
    pub authors: Vec<String>,
    pub primary_author: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<f64>,
}

impl NormalizedRecord {
    pub fn priority(&self) -> SourcePriority {
        SourcePriority::of(&self.merged)
    }
}

/// A normalized record with its identity, kept for lineage (`book_source_detail`).
#[derive(Debug, Clone, PartialEq)]
pub struct BookSourceDetail {
    pub book_id: BookId,
    pub record: NormalizedRecord,
}

/// One row of `dim_book`: the deduplication winner for a `book_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalBook {
    pub book_id: BookId,
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "titulo_normalizado")]
    pub normalized_title: Option<String>,
    #[serde(rename = "autor_principal")]
    pub primary_author: Option<String>,
    #[serde(rename = "autores")]
    pub authors: Vec<String>,
    #[serde(rename = "editorial")]
    pub publisher: Option<String>,
    #[serde(rename = "anio_publicacion")]
    pub pub_year: Option<i32>,
    #[serde(rename = "fecha_publicacion")]
    pub pub_date: Option<String>,
    #[serde(rename = "idioma")]
    pub language: Option<String>,
    pub isbn10: Option<String>,
    pub isbn13: Option<String>,
    #[serde(rename = "precio")]
    pub price: Option<f64>,
    #[serde(rename = "moneda")]
    pub currency: Option<String>,
    #[serde(rename = "ts_ultima_actualizacion")]
    pub last_updated: DateTime<Utc>,
}

impl CanonicalBook {
    /// Project the winning detail row onto the dimension columns.
    pub fn from_winner(winner: &BookSourceDetail, last_updated: DateTime<Utc>) -> Self {
        let record = &winner.record;
        Self {
            book_id: winner.book_id.clone(),
            title: record.title.clone(),
            normalized_title: record.normalized_title.clone(),
            primary_author: record.primary_author.clone(),
            authors: record.authors.clone(),
            publisher: record.publisher.clone(),
            pub_year: record.pub_year,
            pub_date: record.pub_date.clone(),
            language: record.language.clone(),
            isbn10: record.isbn10.clone(),
            isbn13: record.isbn13.clone(),
            price: record.price,
            currency: record.currency.clone(),
            last_updated,
        }
    }
}
