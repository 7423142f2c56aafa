//! Integration tests for the quality reporter.

use bookdim_model::{GoodreadsRecord, GoogleBooksRecord};
use bookdim_quality::{PipelineQualityReport, quality_report};

fn goodreads(title: &str, isbn13: Option<&str>) -> GoodreadsRecord {
    GoodreadsRecord {
        title: Some(title.to_string()),
        author: Some("Robert C. Martin".to_string()),
        rating: Some(4.4),
        ratings_count: Some(1200),
        book_url: Some(format!("https://www.goodreads.com/book/{title}")),
        isbn10: None,
        isbn13: isbn13.map(str::to_string),
    }
}

#[test]
fn counts_nulls_and_duplicates() {
    let rows = vec![
        goodreads("Clean Code", Some("9780132350884")),
        goodreads("Clean Code", Some("9780132350884")),
        goodreads("Refactoring", None),
    ];
    let report = quality_report("Goodreads", &rows);

    assert_eq!(report.source, "Goodreads");
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.duplicate_rows, 1);
    assert_eq!(report.null_counts.get("isbn10"), Some(&3));
    assert_eq!(report.null_counts.get("isbn13"), Some(&1));
    assert_eq!(report.null_counts.get("fuente"), Some(&0));
    assert_eq!(
        report.null_percentages.get("isbn13").map(String::as_str),
        Some("33.33%")
    );
    assert_eq!(report.columns_with_nulls(), 2);
}

#[test]
fn does_not_mutate_input() {
    let rows = vec![goodreads("Clean Code", None)];
    let before = rows.clone();
    let _ = quality_report("Goodreads", &rows);
    assert_eq!(rows, before);
}

#[test]
fn empty_source_reports_zero_percentages() {
    let rows: Vec<GoogleBooksRecord> = Vec::new();
    let report = quality_report("Google Books", &rows);
    assert_eq!(report.total_rows, 0);
    assert_eq!(report.duplicate_rows, 0);
    assert!(report.null_percentages.iter().all(|(_, pct)| pct == "0.00%"));
}

#[test]
fn rows_differing_in_one_field_are_not_duplicates() {
    let mut second = goodreads("Clean Code", None);
    second.rating = Some(4.5);
    let rows = vec![goodreads("Clean Code", None), second];
    assert_eq!(quality_report("Goodreads", &rows).duplicate_rows, 0);
}

#[test]
fn pipeline_report_serializes_with_report_keys() {
    let gr = quality_report("Goodreads", &[goodreads("Clean Code", None)]);
    let gb = quality_report(
        "Google Books",
        &[GoogleBooksRecord {
            title: Some("Refactoring".to_string()),
            ..GoogleBooksRecord::default()
        }],
    );
    let report = PipelineQualityReport::new(gr, gb, 0, 1);
    let json = serde_json::to_value(&report).expect("serialize report");

    assert_eq!(json["fuentes"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["fuentes"][1]["fuente"], "Google Books");
    assert_eq!(json["fuentes"][1]["nulos_por_columna"]["gb_id"], 1);
    assert_eq!(json["duplicados_encontrados"], 0);
    assert_eq!(json["total_libros_en_dimension"], 1);
}

#[test]
fn source_report_snapshot() {
    let rows = vec![GoodreadsRecord {
        title: Some("Refactoring".to_string()),
        ..GoodreadsRecord::default()
    }];
    let report = quality_report("Goodreads", &rows);
    insta::assert_json_snapshot!(report, @r###"
    {
      "fuente": "Goodreads",
      "filas_totales": 1,
      "nulos_por_columna": {
        "title": 0,
        "author": 1,
        "rating": 1,
        "ratings_count": 1,
        "book_url": 1,
        "isbn10": 1,
        "isbn13": 1,
        "fuente": 0
      },
      "porcentaje_nulos_por_columna": {
        "title": "0.00%",
        "author": "100.00%",
        "rating": "100.00%",
        "ratings_count": "100.00%",
        "book_url": "100.00%",
        "isbn10": "100.00%",
        "isbn13": "100.00%",
        "fuente": "0.00%"
      },
      "filas_duplicadas": 0
    }
    "###);
}
