//! Integration pipeline with explicit stages.
//!
//! 1. **Join**: attach the Google Books record sharing each Goodreads title
//! 2. **Normalize**: survivorship and field cleaning
//! 3. **Identify**: ISBN-13 or hash fallback `book_id`
//! 4. **Dedupe**: one canonical book per `book_id`
//!
//! Each stage consumes the previous stage's values and returns new ones.

use chrono::{DateTime, Utc};
use tracing::debug;

use bookdim_model::{BookSourceDetail, CanonicalBook, GoodreadsRecord, GoogleBooksRecord};

use crate::dedupe::deduplicate;
use crate::identity::assign_book_id;
use crate::join::join_sources;
use crate::normalize::normalize_record;

/// Result of one integration run.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationOutput {
    /// Canonical books ordered by `book_id`.
    pub dim_book: Vec<CanonicalBook>,
    /// Every normalized record before deduplication, in Goodreads input order.
    pub source_detail: Vec<BookSourceDetail>,
    /// Detail rows that lost to a higher-priority or earlier row.
    pub duplicates_found: usize,
}

/// Run the merge engine over both record sets.
///
/// `run_ts` stamps both `ts_ingesta` on detail rows and
/// `ts_ultima_actualizacion` on canonical books, so the output is fully
/// determined by the arguments.
pub fn integrate(
    goodreads: &[GoodreadsRecord],
    google_books: &[GoogleBooksRecord],
    run_ts: DateTime<Utc>,
) -> IntegrationOutput {
    let merged = join_sources(goodreads, google_books, run_ts);

    let source_detail: Vec<BookSourceDetail> = merged
        .iter()
        .map(normalize_record)
        .map(assign_book_id)
        .collect();
    debug!(
        records = source_detail.len(),
        hash_fallbacks = source_detail
            .iter()
            .filter(|detail| detail.book_id.is_hash_fallback())
            .count(),
        "assigned book ids"
    );

    let deduped = deduplicate(&source_detail);
    let dim_book: Vec<CanonicalBook> = deduped
        .winners
        .iter()
        .map(|winner| CanonicalBook::from_winner(winner, run_ts))
        .collect();
    debug!(
        dim_book = dim_book.len(),
        duplicates = deduped.dropped,
        "selected canonical books"
    );

    IntegrationOutput {
        dim_book,
        source_detail,
        duplicates_found: deduped.dropped,
    }
}
