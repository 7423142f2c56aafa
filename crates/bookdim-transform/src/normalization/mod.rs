//! Field normalizers for book metadata.
//!
//! - **date**: publication dates to ISO 8601 `YYYY-MM-DD`
//! - **codes**: BCP-47 language and ISO 4217 currency shape validation
//! - **text**: whitespace cleanup, title normalization, author lists

pub mod codes;
pub mod date;
pub mod text;

pub use codes::{validate_currency_code, validate_language_code};
pub use date::{publication_year, validate_date};
pub use text::{clean_string, normalize_title, split_authors};
