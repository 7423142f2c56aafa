//! Book metadata transformation utilities.
//!
//! - **isbn**: ISBN-10/ISBN-13 cleaning and checksum validation
//! - **normalization**: dates, language and currency codes, free text, authors
//!
//! Every function is total: malformed input yields `None`, never an error.

pub mod isbn;
pub mod normalization;

pub use isbn::{clean_isbn, format_isbn10, format_isbn13, is_valid_isbn10, is_valid_isbn13};
pub use normalization::{
    clean_string, normalize_title, publication_year, split_authors, validate_currency_code,
    validate_date, validate_language_code,
};
