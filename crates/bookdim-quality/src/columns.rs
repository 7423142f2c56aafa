//! Tabular views of raw source records.

use bookdim_model::{GoodreadsRecord, GoogleBooksRecord, SourceTag};

/// Raw Goodreads columns, including the `fuente` origin tag.
pub const GOODREADS_COLUMNS: &[&str] = &[
    "title",
    "author",
    "rating",
    "ratings_count",
    "book_url",
    "isbn10",
    "isbn13",
    "fuente",
];

/// Raw Google Books columns, including the `fuente` origin tag.
pub const GOOGLE_BOOKS_COLUMNS: &[&str] = &[
    "gb_id",
    "title",
    "subtitle",
    "authors",
    "publisher",
    "pub_date",
    "language",
    "categories",
    "isbn13",
    "isbn10",
    "price_amount",
    "price_currency",
    "fuente",
];

/// A record that can be inspected column by column.
///
/// `cells` must return one entry per name in `COLUMNS`, in the same order;
/// `None` marks a null cell.
pub trait QualityRows {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Option<String>>;
}

fn tag(source: SourceTag) -> Option<String> {
    Some(source.as_str().to_string())
}

impl QualityRows for GoodreadsRecord {
    const COLUMNS: &'static [&'static str] = GOODREADS_COLUMNS;

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            self.title.clone(),
            self.author.clone(),
            self.rating.map(|v| v.to_string()),
            self.ratings_count.map(|v| v.to_string()),
            self.book_url.clone(),
            self.isbn10.clone(),
            self.isbn13.clone(),
            tag(Self::SOURCE),
        ]
    }
}

impl QualityRows for GoogleBooksRecord {
    const COLUMNS: &'static [&'static str] = GOOGLE_BOOKS_COLUMNS;

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            self.gb_id.clone(),
            self.title.clone(),
            self.subtitle.clone(),
            self.authors.clone(),
            self.publisher.clone(),
            self.pub_date.clone(),
            self.language.clone(),
            self.categories.clone(),
            self.isbn13.clone(),
            self.isbn10.clone(),
            self.price_amount.map(|v| v.to_string()),
            self.price_currency.clone(),
            tag(Self::SOURCE),
        ]
    }
}
