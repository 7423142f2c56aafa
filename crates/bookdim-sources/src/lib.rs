//! Upstream collaborators that populate the landing zone.
//!
//! - [`goodreads`]: scrapes the Goodreads search results and book pages
//! - [`google_books`]: looks each scraped book up in the Google Books
//!   volumes API
//! - [`http`]: blocking HTTP client with retry and exponential backoff
//!
//! Network failures never abort a run: they are retried, logged and then
//! treated as "no data" for the affected item.

pub mod error;
pub mod goodreads;
pub mod google_books;
pub mod http;

pub use error::{Result, SourceError};
pub use goodreads::{
    GOODREADS_BASE_URL, GoodreadsScraper, SearchHit, parse_book_isbns, parse_minirating,
    parse_search_page, search_url,
};
pub use google_books::{
    GoogleBooksClient, IndustryIdentifier, ListPrice, SaleInfo, VOLUMES_URL, Volume, VolumeInfo,
    VolumeLookup, VolumeQuery, VolumesResponse, enrich, extract_volume,
};
pub use http::{HttpFetcher, PageFetcher, RetryPolicy};
