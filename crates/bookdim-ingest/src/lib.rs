//! Landing zone I/O.
//!
//! The scraper writes `goodreads_books.json`, the enricher writes
//! `googlebooks_books.csv`, and the integration pipeline reads both back.

pub mod error;
pub mod landing;

pub use error::{IngestError, Result};
pub use landing::{
    GOODREADS_FILE, GOOGLE_BOOKS_FILE, LandingSources, load_goodreads, load_google_books,
    load_scraped, load_sources, write_goodreads, write_google_books,
};
