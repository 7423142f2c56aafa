//! Landing zone read/write tests.

use std::fs;

use chrono::{TimeZone, Utc};

use bookdim_ingest::{
    GOODREADS_FILE, GOOGLE_BOOKS_FILE, IngestError, load_scraped, load_sources, write_goodreads,
    write_google_books,
};
use bookdim_model::{GoodreadsRecord, GoogleBooksRecord};

fn clean_code() -> GoodreadsRecord {
    GoodreadsRecord {
        title: Some("Clean Code".to_string()),
        author: Some("Robert C. Martin".to_string()),
        rating: Some(4.37),
        ratings_count: Some(23_456),
        book_url: Some("https://www.goodreads.com/book/show/3735293".to_string()),
        isbn10: Some("0132350882".to_string()),
        isbn13: None,
    }
}

fn refactoring() -> GoogleBooksRecord {
    GoogleBooksRecord {
        gb_id: Some("HmrDHwgkbPsC".to_string()),
        title: Some("Refactoring".to_string()),
        authors: Some("Martin Fowler, Kent Beck".to_string()),
        publisher: Some("Addison-Wesley".to_string()),
        pub_date: Some("2018-11-20".to_string()),
        language: Some("en".to_string()),
        isbn10: Some("0134757599".to_string()),
        price_amount: Some(47.99),
        price_currency: Some("USD".to_string()),
        ..GoogleBooksRecord::default()
    }
}

#[test]
fn written_files_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let landing = dir.path().join("landing");

    write_goodreads(&landing, &[clean_code()]).unwrap();
    write_google_books(&landing, &[refactoring()]).unwrap();

    let sources = load_sources(&landing).unwrap();
    assert_eq!(sources.goodreads, vec![clean_code()]);
    assert_eq!(sources.google_books, vec![refactoring()]);
}

#[test]
fn google_books_csv_uses_semicolons() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_google_books(dir.path(), &[refactoring()]).unwrap();
    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(
            "gb_id;title;subtitle;authors;publisher;pub_date;language;categories;\
             isbn13;isbn10;price_amount;price_currency"
        )
    );
    assert_eq!(
        lines.next(),
        Some(
            "HmrDHwgkbPsC;Refactoring;;Martin Fowler, Kent Beck;Addison-Wesley;\
             2018-11-20;en;;;0134757599;47.99;USD"
        )
    );
}

#[test]
fn empty_google_books_file_keeps_header() {
    let dir = tempfile::tempdir().unwrap();
    write_goodreads(dir.path(), &[]).unwrap();
    write_google_books(dir.path(), &[]).unwrap();

    let sources = load_sources(dir.path()).unwrap();
    assert!(sources.goodreads.is_empty());
    assert!(sources.google_books.is_empty());
}

#[test]
fn missing_google_books_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_goodreads(dir.path(), &[clean_code()]).unwrap();

    let error = load_sources(dir.path()).unwrap_err();
    match &error {
        IngestError::MissingSource { path, command } => {
            assert!(path.ends_with(GOOGLE_BOOKS_FILE));
            assert_eq!(*command, "enrich");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(error.to_string().contains("run `enrich` first"));
}

#[test]
fn missing_goodreads_file_is_checked_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(GOOGLE_BOOKS_FILE), "not;a;valid;file\n\"").unwrap();

    let error = load_sources(dir.path()).unwrap_err();
    assert!(matches!(
        error,
        IngestError::MissingSource { command: "scrape", .. }
    ));
}

#[test]
fn goodreads_json_accepts_numeric_isbns() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(GOODREADS_FILE),
        r#"[{"title": "Clean Code", "isbn13": 9780132350884, "rating": 4.37}]"#,
    )
    .unwrap();
    write_google_books(dir.path(), &[]).unwrap();

    let sources = load_sources(dir.path()).unwrap();
    assert_eq!(
        sources.goodreads[0].isbn13.as_deref(),
        Some("9780132350884")
    );
}

#[test]
fn enricher_input_requires_scrape_output() {
    let dir = tempfile::tempdir().unwrap();
    let error = load_scraped(dir.path()).unwrap_err();
    assert!(error.to_string().contains("run `scrape` first"));

    write_goodreads(dir.path(), &[clean_code()]).unwrap();
    assert_eq!(load_scraped(dir.path()).unwrap(), vec![clean_code()]);
}

#[test]
fn padded_google_books_title_is_loaded_verbatim_and_not_joined() {
    let dir = tempfile::tempdir().unwrap();
    write_goodreads(dir.path(), &[clean_code()]).unwrap();
    fs::write(
        dir.path().join(GOOGLE_BOOKS_FILE),
        "gb_id;title;subtitle;authors;publisher;pub_date;language;categories;\
         isbn13;isbn10;price_amount;price_currency\n\
         _i6bDeoCQzsC; Clean Code ;;Robert C. Martin;Pearson;2008-08-01;en;;\
         9780132350884;0132350882;35.99;EUR\n",
    )
    .unwrap();

    let sources = load_sources(dir.path()).unwrap();
    assert_eq!(sources.google_books[0].title.as_deref(), Some(" Clean Code "));

    let run_ts = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
    let output = bookdim_core::integrate(&sources.goodreads, &sources.google_books, run_ts);
    assert_eq!(output.source_detail.len(), 1);
    assert!(!output.source_detail[0].record.merged.has_google_match());
    assert_eq!(output.dim_book[0].publisher, None);
}
