//! Left-outer join of Goodreads records onto Google Books records.
//!
//! Records are matched on exact title equality. No normalization happens at
//! join time, so titles differing only in case or whitespace do not match;
//! an unmatched record is not an error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use bookdim_model::{GoodreadsRecord, GoogleBooksRecord, MergedRecord};

/// Exact-title lookup over Google Books records.
///
/// When several records share a title the first one wins.
#[derive(Debug, Default)]
pub struct TitleIndex<'a> {
    by_title: HashMap<&'a str, &'a GoogleBooksRecord>,
}

impl<'a> TitleIndex<'a> {
    pub fn build(records: &'a [GoogleBooksRecord]) -> Self {
        let mut by_title = HashMap::with_capacity(records.len());
        for record in records {
            let Some(title) = record.title.as_deref() else {
                continue;
            };
            by_title.entry(title).or_insert(record);
        }
        Self { by_title }
    }

    pub fn get(&self, title: Option<&str>) -> Option<&'a GoogleBooksRecord> {
        title.and_then(|title| self.by_title.get(title).copied())
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

/// Produce one merged record per Goodreads record, in input order.
pub fn join_sources(
    goodreads: &[GoodreadsRecord],
    google_books: &[GoogleBooksRecord],
    ingested_at: DateTime<Utc>,
) -> Vec<MergedRecord> {
    let index = TitleIndex::build(google_books);
    let merged: Vec<MergedRecord> = goodreads
        .iter()
        .map(|record| MergedRecord {
            goodreads: record.clone(),
            google_books: index.get(record.title.as_deref()).cloned(),
            ingested_at,
        })
        .collect();
    debug!(
        goodreads_count = goodreads.len(),
        indexed_titles = index.len(),
        matched = merged.iter().filter(|m| m.has_google_match()).count(),
        "joined sources"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gr(title: Option<&str>) -> GoodreadsRecord {
        GoodreadsRecord {
            title: title.map(str::to_string),
            ..GoodreadsRecord::default()
        }
    }

    fn gb(id: &str, title: &str) -> GoogleBooksRecord {
        GoogleBooksRecord {
            gb_id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..GoogleBooksRecord::default()
        }
    }

    #[test]
    fn test_exact_title_match() {
        let google = vec![gb("a", "Refactoring"), gb("b", "Clean Code")];
        let merged = join_sources(&[gr(Some("Clean Code"))], &google, Utc::now());
        assert_eq!(merged.len(), 1);
        let matched = merged[0].google_books.as_ref().unwrap();
        assert_eq!(matched.gb_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_case_and_whitespace_do_not_match() {
        let google = vec![gb("a", "Clean Code")];
        let goodreads = vec![gr(Some("clean code")), gr(Some("Clean  Code")), gr(None)];
        let merged = join_sources(&goodreads, &google, Utc::now());
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|m| !m.has_google_match()));
    }

    #[test]
    fn test_first_duplicate_title_wins() {
        let google = vec![gb("first", "Clean Code"), gb("second", "Clean Code")];
        let index = TitleIndex::build(&google);
        assert_eq!(index.len(), 1);
        let hit = index.get(Some("Clean Code")).unwrap();
        assert_eq!(hit.gb_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_untitled_google_records_are_not_indexed() {
        let google = vec![GoogleBooksRecord::default()];
        assert!(TitleIndex::build(&google).is_empty());
    }
}
