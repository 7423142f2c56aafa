//! Field-level survivorship and cleaning for merged records.
//!
//! Identifiers, title and authors prefer the Google Books side and fall back
//! to Goodreads. Publisher, date, language, currency and price exist only on
//! the Google Books side. Every cleaned field is either valid or `None`.

use bookdim_model::{MergedRecord, NormalizedRecord};
use bookdim_transform::{
    clean_string, format_isbn10, format_isbn13, normalize_title, publication_year, split_authors,
    validate_currency_code, validate_date, validate_language_code,
};

/// Clean one merged record. Pure; the input is left untouched.
pub fn normalize_record(merged: &MergedRecord) -> NormalizedRecord {
    let goodreads = &merged.goodreads;

    let isbn13 = format_isbn13(
        merged
            .google_field(|gb| gb.isbn13.as_ref())
            .or(goodreads.isbn13.as_deref()),
    );
    let isbn10 = format_isbn10(
        merged
            .google_field(|gb| gb.isbn10.as_ref())
            .or(goodreads.isbn10.as_deref()),
    );

    let title = merged
        .google_field(|gb| gb.title.as_ref())
        .or(goodreads.title.as_deref())
        .and_then(non_empty_clean);
    let normalized_title = title
        .as_deref()
        .map(normalize_title)
        .filter(|value| !value.is_empty());

    let authors = merged
        .google_field(|gb| gb.authors.as_ref())
        .or(goodreads.author.as_deref())
        .map(split_authors)
        .unwrap_or_default();
    let primary_author = authors.first().cloned();

    let pub_date = merged
        .google_field(|gb| gb.pub_date.as_ref())
        .and_then(validate_date);
    let pub_year = pub_date.as_deref().and_then(publication_year);

    NormalizedRecord {
        isbn13,
        isbn10,
        pub_date,
        pub_year,
        language: merged
            .google_field(|gb| gb.language.as_ref())
            .and_then(validate_language_code),
        currency: merged
            .google_field(|gb| gb.price_currency.as_ref())
            .and_then(validate_currency_code),
        title,
        normalized_title,
        authors,
        primary_author,
        publisher: merged
            .google_field(|gb| gb.publisher.as_ref())
            .and_then(non_empty_clean),
        price: merged.google_books.as_ref().and_then(|gb| gb.price_amount),
        merged: merged.clone(),
    }
}

fn non_empty_clean(value: &str) -> Option<String> {
    Some(clean_string(value)).filter(|cleaned| !cleaned.is_empty())
}
