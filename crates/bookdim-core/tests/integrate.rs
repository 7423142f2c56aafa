//! End-to-end tests for the merge engine.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use bookdim_core::integrate;
use bookdim_model::{GoodreadsRecord, GoogleBooksRecord};

fn run_ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap()
}

fn goodreads(title: &str, author: &str) -> GoodreadsRecord {
    GoodreadsRecord {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        rating: Some(4.3),
        ratings_count: Some(1000),
        book_url: Some(format!("https://www.goodreads.com/book/show/{title}")),
        isbn10: None,
        isbn13: None,
    }
}

fn google_books(title: &str, isbn13: &str) -> GoogleBooksRecord {
    GoogleBooksRecord {
        gb_id: Some(format!("gb-{title}")),
        title: Some(title.to_string()),
        publisher: Some("Addison-Wesley".to_string()),
        pub_date: Some("2018-11-20".to_string()),
        language: Some("en".to_string()),
        isbn13: Some(isbn13.to_string()),
        price_amount: Some(47.99),
        price_currency: Some("USD".to_string()),
        ..GoogleBooksRecord::default()
    }
}

#[test]
fn clean_code_and_refactoring_scenario() {
    let goodreads = vec![
        goodreads("Clean Code", "Robert C. Martin"),
        goodreads("Refactoring", "Martin Fowler"),
    ];
    let google = vec![google_books("Refactoring", "9780132350884")];

    let output = integrate(&goodreads, &google, run_ts());

    assert_eq!(output.dim_book.len(), 2);
    assert_eq!(output.source_detail.len(), 2);
    assert_eq!(output.duplicates_found, 0);

    let refactoring = output
        .dim_book
        .iter()
        .find(|book| book.title.as_deref() == Some("Refactoring"))
        .expect("refactoring row");
    assert_eq!(refactoring.book_id.as_str(), "9780132350884");
    assert_eq!(refactoring.publisher.as_deref(), Some("Addison-Wesley"));
    assert_eq!(refactoring.pub_year, Some(2018));
    assert_eq!(refactoring.authors, vec!["Martin Fowler"]);
    assert_eq!(refactoring.last_updated, run_ts());

    let clean_code = output
        .dim_book
        .iter()
        .find(|book| book.title.as_deref() == Some("Clean Code"))
        .expect("clean code row");
    // sha256("clean code" + "Robert C. Martin" + "null" + "null")
    assert_eq!(
        clean_code.book_id.as_str(),
        "60ee95d400ffc01a6441d9b8c51ed5fc4fc7895815480ee50309143201e761d6"
    );
    assert_eq!(clean_code.publisher, None);
    assert_eq!(clean_code.pub_year, None);

    let ids: Vec<&str> = output.dim_book.iter().map(|b| b.book_id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn matched_record_wins_shared_book_id() {
    let mut unmatched = goodreads("Refactoring, 2nd Edition", "M. Fowler");
    unmatched.isbn13 = Some("978-0-13-475759-9".to_string());
    let matched = goodreads("Refactoring", "Martin Fowler");
    let google = vec![google_books("Refactoring", "9780134757599")];

    for goodreads in [
        vec![unmatched.clone(), matched.clone()],
        vec![matched.clone(), unmatched.clone()],
    ] {
        let output = integrate(&goodreads, &google, run_ts());
        assert_eq!(output.dim_book.len(), 1);
        assert_eq!(output.duplicates_found, 1);
        let book = &output.dim_book[0];
        assert_eq!(book.book_id.as_str(), "9780134757599");
        assert_eq!(book.title.as_deref(), Some("Refactoring"));
        assert_eq!(book.publisher.as_deref(), Some("Addison-Wesley"));
        assert_eq!(book.price, Some(47.99));
        assert_eq!(book.currency.as_deref(), Some("USD"));
    }
}

#[test]
fn unmatched_records_keep_google_fields_null() {
    let output = integrate(&[goodreads("Dune", "Frank Herbert")], &[], run_ts());
    let detail = &output.source_detail[0];
    assert!(detail.record.merged.google_books.is_none());
    assert_eq!(detail.record.language, None);
    assert_eq!(detail.record.price, None);
    assert_eq!(detail.record.merged.ingested_at, run_ts());
}

#[test]
fn empty_inputs_produce_empty_output() {
    let output = integrate(&[], &[google_books("Refactoring", "9780132350884")], run_ts());
    assert!(output.dim_book.is_empty());
    assert!(output.source_detail.is_empty());
    assert_eq!(output.duplicates_found, 0);
}

const TITLES: &[&str] = &["Clean Code", "Refactoring", "Dune", "Emma"];
const AUTHORS: &[&str] = &["Robert C. Martin", "Martin Fowler", "Frank Herbert"];
const ISBNS: &[&str] = &["9780132350884", "9780134757599", "9780201485677"];

fn arb_goodreads() -> impl Strategy<Value = GoodreadsRecord> {
    (
        0..TITLES.len(),
        0..AUTHORS.len(),
        prop::option::of(0..ISBNS.len()),
    )
        .prop_map(|(title, author, isbn)| GoodreadsRecord {
            isbn13: isbn.map(|idx| ISBNS[idx].to_string()),
            ..goodreads(TITLES[title], AUTHORS[author])
        })
}

fn google_catalog() -> Vec<GoogleBooksRecord> {
    vec![
        google_books("Refactoring", "9780134757599"),
        GoogleBooksRecord {
            isbn13: None,
            ..google_books("Emma", "")
        },
    ]
}

proptest! {
    #[test]
    fn integration_is_idempotent(records in prop::collection::vec(arb_goodreads(), 0..12)) {
        let google = google_catalog();
        let first = integrate(&records, &google, run_ts());
        let second = integrate(&records, &google, run_ts());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reordering_keeps_dimension_identities(
        (records, shuffled) in prop::collection::vec(arb_goodreads(), 0..12)
            .prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle()))
    ) {
        let google = google_catalog();
        let original = integrate(&records, &google, run_ts());
        let permuted = integrate(&shuffled, &google, run_ts());

        let identities = |output: &bookdim_core::IntegrationOutput| {
            output
                .dim_book
                .iter()
                .map(|book| (book.book_id.clone(), book.publisher.clone()))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(identities(&original), identities(&permuted));
        prop_assert_eq!(original.duplicates_found, permuted.duplicates_found);
    }
}
