//! Identity resolution.
//!
//! A checksum-valid ISBN-13 is the identity whenever one survived
//! normalization. Otherwise the identity is the SHA-256 digest of the
//! concatenated key `{normalized_title}{primary_author}{publisher}{pub_year}`
//! with [`NULL_KEY_MARKER`] standing in for each missing component.
//!
//! Records missing the same components collide on purpose: two untitled,
//! authorless books without a publisher or year share one identity.
//!
//! The marker is a fixed literal. Fallback identities produced by tools that
//! render missing values differently (`nan`, `None`, `<NA>`) do not line up
//! with these, so hash-keyed `book_id`s are only comparable across runs of
//! this pipeline.

use sha2::{Digest, Sha256};

use bookdim_model::{BookId, BookSourceDetail, NormalizedRecord};

/// Rendering of a missing component in the fallback key.
pub const NULL_KEY_MARKER: &str = "null";

/// Fallback key string hashed when no ISBN-13 is available.
pub fn fallback_key(record: &NormalizedRecord) -> String {
    let year = record.pub_year.map(|year| year.to_string());
    [
        record.normalized_title.as_deref(),
        record.primary_author.as_deref(),
        record.publisher.as_deref(),
        year.as_deref(),
    ]
    .into_iter()
    .map(|component| component.unwrap_or(NULL_KEY_MARKER))
    .collect()
}

/// Attach a `book_id` to a normalized record.
pub fn assign_book_id(record: NormalizedRecord) -> BookSourceDetail {
    let book_id = match record.isbn13.as_deref() {
        Some(isbn13) => BookId::from_isbn13(isbn13),
        None => {
            let mut hasher = Sha256::new();
            hasher.update(fallback_key(&record).as_bytes());
            BookId::from_sha256(hasher.finalize().into())
        }
    };
    BookSourceDetail { book_id, record }
}
