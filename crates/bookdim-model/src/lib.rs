//! Data model for the book dimension pipeline.
//!
//! - **record**: raw source records as fetched from Goodreads and Google Books
//! - **book**: merged, normalized and canonical book records
//! - **ids**: the `book_id` identity key
//! - **config**: explicit run configuration passed into entry points

pub mod book;
pub mod config;
pub mod error;
pub mod ids;
pub mod loose;
pub mod record;

pub use book::{BookSourceDetail, CanonicalBook, MergedRecord, NormalizedRecord, SourcePriority};
pub use config::{DEFAULT_MAX_RESULTS, DEFAULT_QUERY, ScrapeConfig};
pub use error::{ModelError, Result};
pub use ids::BookId;
pub use record::{GoodreadsRecord, GoogleBooksRecord, SourceTag};
