//! Canonical merge engine.
//!
//! Turns the Goodreads and Google Books record sets into one canonical book
//! per identity:
//!
//! 1. [`join`]: left-outer join on exact title equality
//! 2. [`normalize`]: field-level survivorship and cleaning
//! 3. [`identity`]: `book_id` from ISBN-13 or a SHA-256 fallback
//! 4. [`dedupe`]: one winner per `book_id`
//!
//! [`integrate`] runs all four stages. The result is a pure function of the
//! two record sets and the run timestamp.

pub mod dedupe;
pub mod identity;
pub mod join;
pub mod normalize;
pub mod pipeline;

pub use dedupe::{DedupeResult, deduplicate};
pub use identity::{NULL_KEY_MARKER, assign_book_id, fallback_key};
pub use join::{TitleIndex, join_sources};
pub use normalize::normalize_record;
pub use pipeline::{IntegrationOutput, integrate};
