//! Column definitions for the output tables.

use chrono::{DateTime, SecondsFormat, Utc};

use bookdim_model::{BookSourceDetail, CanonicalBook, GoogleBooksRecord, SourceTag};

/// Physical type of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    TextList,
    Int32,
    Int64,
    Float64,
    /// RFC 3339 UTC timestamp stored as text.
    Timestamp,
}

impl ColumnKind {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::TextList => "list<string>",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Timestamp => "string (RFC 3339)",
        }
    }
}

/// One cell extracted from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(Option<String>),
    List(Vec<String>),
    Int(Option<i64>),
    Float(Option<f64>),
}

/// Name, type, documentation and extractor of one output column.
pub struct ColumnSpec<T> {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub example: &'static str,
    pub description: &'static str,
    pub value: fn(&T) -> CellValue,
}

fn text(value: &Option<String>) -> CellValue {
    CellValue::Text(value.clone())
}

fn timestamp(value: &DateTime<Utc>) -> CellValue {
    CellValue::Text(Some(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
}

fn google_text(
    detail: &BookSourceDetail,
    field: fn(&GoogleBooksRecord) -> &Option<String>,
) -> CellValue {
    CellValue::Text(detail.record.merged.google_books.as_ref().and_then(|gb| field(gb).clone()))
}

/// `dim_book` columns, in file order.
pub const DIM_BOOK_COLUMNS: &[ColumnSpec<CanonicalBook>] = &[
    ColumnSpec {
        name: "book_id",
        kind: ColumnKind::Text,
        nullable: false,
        example: "9780132350884",
        description: "Identity key. The validated ISBN-13 when available, otherwise the \
                      SHA-256 of normalized title, primary author, publisher and year.",
        value: |book| CellValue::Text(Some(book.book_id.as_str().to_string())),
    },
    ColumnSpec {
        name: "titulo",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Clean Code",
        description: "Title with collapsed whitespace. Google Books first, then Goodreads.",
        value: |book| text(&book.title),
    },
    ColumnSpec {
        name: "titulo_normalizado",
        kind: ColumnKind::Text,
        nullable: true,
        example: "clean code",
        description: "Lowercase title restricted to letters, digits and single spaces.",
        value: |book| text(&book.normalized_title),
    },
    ColumnSpec {
        name: "autor_principal",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Robert C. Martin",
        description: "First entry of `autores`.",
        value: |book| text(&book.primary_author),
    },
    ColumnSpec {
        name: "autores",
        kind: ColumnKind::TextList,
        nullable: false,
        example: "[\"Robert C. Martin\"]",
        description: "Author list. Google Books authors, or the single Goodreads author.",
        value: |book| CellValue::List(book.authors.clone()),
    },
    ColumnSpec {
        name: "editorial",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Prentice Hall",
        description: "Publisher, from Google Books only.",
        value: |book| text(&book.publisher),
    },
    ColumnSpec {
        name: "anio_publicacion",
        kind: ColumnKind::Int32,
        nullable: true,
        example: "2008",
        description: "Year of `fecha_publicacion`.",
        value: |book| CellValue::Int(book.pub_year.map(i64::from)),
    },
    ColumnSpec {
        name: "fecha_publicacion",
        kind: ColumnKind::Text,
        nullable: true,
        example: "2008-08-01",
        description: "Publication date as ISO 8601 `YYYY-MM-DD`. Partial dates are \
                      widened to the first day of the month or year.",
        value: |book| text(&book.pub_date),
    },
    ColumnSpec {
        name: "idioma",
        kind: ColumnKind::Text,
        nullable: true,
        example: "en",
        description: "BCP-47 language code (`xx` or `xx-YY`).",
        value: |book| text(&book.language),
    },
    ColumnSpec {
        name: "isbn10",
        kind: ColumnKind::Text,
        nullable: true,
        example: "0132350882",
        description: "Checksum-valid ISBN-10 without separators.",
        value: |book| text(&book.isbn10),
    },
    ColumnSpec {
        name: "isbn13",
        kind: ColumnKind::Text,
        nullable: true,
        example: "9780132350884",
        description: "Checksum-valid ISBN-13 without separators.",
        value: |book| text(&book.isbn13),
    },
    ColumnSpec {
        name: "precio",
        kind: ColumnKind::Float64,
        nullable: true,
        example: "35.99",
        description: "List price from Google Books.",
        value: |book| CellValue::Float(book.price),
    },
    ColumnSpec {
        name: "moneda",
        kind: ColumnKind::Text,
        nullable: true,
        example: "USD",
        description: "ISO 4217 currency code of `precio`.",
        value: |book| text(&book.currency),
    },
    ColumnSpec {
        name: "ts_ultima_actualizacion",
        kind: ColumnKind::Timestamp,
        nullable: false,
        example: "2024-05-02T08:30:00Z",
        description: "When the integration run that produced the row started.",
        value: |book| timestamp(&book.last_updated),
    },
];

/// `book_source_detail` columns, in file order.
pub const SOURCE_DETAIL_COLUMNS: &[ColumnSpec<BookSourceDetail>] = &[
    ColumnSpec {
        name: "book_id",
        kind: ColumnKind::Text,
        nullable: false,
        example: "9780132350884",
        description: "Identity key assigned to the record.",
        value: |d| CellValue::Text(Some(d.book_id.as_str().to_string())),
    },
    // Goodreads side
    ColumnSpec {
        name: "titulo_gr",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Clean Code",
        description: "Goodreads title.",
        value: |d| text(&d.record.merged.goodreads.title),
    },
    ColumnSpec {
        name: "autor_gr",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Robert C. Martin",
        description: "Goodreads author.",
        value: |d| text(&d.record.merged.goodreads.author),
    },
    ColumnSpec {
        name: "rating_gr",
        kind: ColumnKind::Float64,
        nullable: true,
        example: "4.37",
        description: "Goodreads average rating.",
        value: |d| CellValue::Float(d.record.merged.goodreads.rating),
    },
    ColumnSpec {
        name: "conteo_ratings_gr",
        kind: ColumnKind::Int64,
        nullable: true,
        example: "23456",
        description: "Goodreads ratings count.",
        value: |d| {
            CellValue::Int(
                d.record
                    .merged
                    .goodreads
                    .ratings_count
                    .and_then(|count| i64::try_from(count).ok()),
            )
        },
    },
    ColumnSpec {
        name: "book_url",
        kind: ColumnKind::Text,
        nullable: true,
        example: "https://www.goodreads.com/book/show/3735293-clean-code",
        description: "Goodreads book page.",
        value: |d| text(&d.record.merged.goodreads.book_url),
    },
    ColumnSpec {
        name: "isbn10_gr",
        kind: ColumnKind::Text,
        nullable: true,
        example: "0132350882",
        description: "Raw Goodreads ISBN-10.",
        value: |d| text(&d.record.merged.goodreads.isbn10),
    },
    ColumnSpec {
        name: "isbn13_gr",
        kind: ColumnKind::Text,
        nullable: true,
        example: "9780132350884",
        description: "Raw Goodreads ISBN-13.",
        value: |d| text(&d.record.merged.goodreads.isbn13),
    },
    ColumnSpec {
        name: "fuente_gr",
        kind: ColumnKind::Text,
        nullable: false,
        example: "goodreads",
        description: "Origin tag of the Goodreads side.",
        value: |_| CellValue::Text(Some(SourceTag::Goodreads.as_str().to_string())),
    },
    // Google Books side
    ColumnSpec {
        name: "gb_id",
        kind: ColumnKind::Text,
        nullable: true,
        example: "_i6bDeoCQzsC",
        description: "Google Books volume id.",
        value: |d| google_text(d, |gb| &gb.gb_id),
    },
    ColumnSpec {
        name: "titulo_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Clean Code",
        description: "Google Books title.",
        value: |d| google_text(d, |gb| &gb.title),
    },
    ColumnSpec {
        name: "subtitulo_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "A Handbook of Agile Software Craftsmanship",
        description: "Google Books subtitle.",
        value: |d| google_text(d, |gb| &gb.subtitle),
    },
    ColumnSpec {
        name: "autores_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Robert C. Martin",
        description: "Comma-joined Google Books authors.",
        value: |d| google_text(d, |gb| &gb.authors),
    },
    ColumnSpec {
        name: "editorial_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Pearson Education",
        description: "Google Books publisher.",
        value: |d| google_text(d, |gb| &gb.publisher),
    },
    ColumnSpec {
        name: "fecha_pub_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "2008-08",
        description: "Raw Google Books publication date.",
        value: |d| google_text(d, |gb| &gb.pub_date),
    },
    ColumnSpec {
        name: "idioma_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "en",
        description: "Raw Google Books language.",
        value: |d| google_text(d, |gb| &gb.language),
    },
    ColumnSpec {
        name: "categorias_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Computers",
        description: "Comma-joined Google Books categories.",
        value: |d| google_text(d, |gb| &gb.categories),
    },
    ColumnSpec {
        name: "isbn10_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "0132350882",
        description: "Raw Google Books ISBN-10.",
        value: |d| google_text(d, |gb| &gb.isbn10),
    },
    ColumnSpec {
        name: "isbn13_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "9780132350884",
        description: "Raw Google Books ISBN-13.",
        value: |d| google_text(d, |gb| &gb.isbn13),
    },
    ColumnSpec {
        name: "precio_gb",
        kind: ColumnKind::Float64,
        nullable: true,
        example: "35.99",
        description: "Google Books list price.",
        value: |d| {
            CellValue::Float(
                d.record
                    .merged
                    .google_books
                    .as_ref()
                    .and_then(|gb| gb.price_amount),
            )
        },
    },
    ColumnSpec {
        name: "moneda_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "usd",
        description: "Raw Google Books currency.",
        value: |d| google_text(d, |gb| &gb.price_currency),
    },
    ColumnSpec {
        name: "fuente_gb",
        kind: ColumnKind::Text,
        nullable: true,
        example: "google_books",
        description: "Origin tag of the Google Books side; null when unmatched.",
        value: |d| {
            CellValue::Text(
                d.record
                    .merged
                    .google_books
                    .as_ref()
                    .map(|_| SourceTag::GoogleBooks.as_str().to_string()),
            )
        },
    },
    ColumnSpec {
        name: "ts_ingesta",
        kind: ColumnKind::Timestamp,
        nullable: false,
        example: "2024-05-02T08:30:00Z",
        description: "When the sources were joined.",
        value: |d| timestamp(&d.record.merged.ingested_at),
    },
    // Normalized fields
    ColumnSpec {
        name: "isbn13_limpio",
        kind: ColumnKind::Text,
        nullable: true,
        example: "9780132350884",
        description: "Validated ISBN-13.",
        value: |d| text(&d.record.isbn13),
    },
    ColumnSpec {
        name: "isbn10_limpio",
        kind: ColumnKind::Text,
        nullable: true,
        example: "0132350882",
        description: "Validated ISBN-10.",
        value: |d| text(&d.record.isbn10),
    },
    ColumnSpec {
        name: "fecha_pub_iso",
        kind: ColumnKind::Text,
        nullable: true,
        example: "2008-08-01",
        description: "Validated publication date.",
        value: |d| text(&d.record.pub_date),
    },
    ColumnSpec {
        name: "anio_pub",
        kind: ColumnKind::Int32,
        nullable: true,
        example: "2008",
        description: "Publication year.",
        value: |d| CellValue::Int(d.record.pub_year.map(i64::from)),
    },
    ColumnSpec {
        name: "codigo_idioma",
        kind: ColumnKind::Text,
        nullable: true,
        example: "en",
        description: "Validated language code.",
        value: |d| text(&d.record.language),
    },
    ColumnSpec {
        name: "codigo_moneda",
        kind: ColumnKind::Text,
        nullable: true,
        example: "USD",
        description: "Validated currency code.",
        value: |d| text(&d.record.currency),
    },
    ColumnSpec {
        name: "titulo",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Clean Code",
        description: "Surviving title.",
        value: |d| text(&d.record.title),
    },
    ColumnSpec {
        name: "titulo_normalizado",
        kind: ColumnKind::Text,
        nullable: true,
        example: "clean code",
        description: "Normalized title.",
        value: |d| text(&d.record.normalized_title),
    },
    ColumnSpec {
        name: "autores",
        kind: ColumnKind::TextList,
        nullable: false,
        example: "[\"Robert C. Martin\"]",
        description: "Surviving author list.",
        value: |d| CellValue::List(d.record.authors.clone()),
    },
    ColumnSpec {
        name: "autor_principal",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Robert C. Martin",
        description: "First surviving author.",
        value: |d| text(&d.record.primary_author),
    },
    ColumnSpec {
        name: "editorial",
        kind: ColumnKind::Text,
        nullable: true,
        example: "Prentice Hall",
        description: "Cleaned publisher.",
        value: |d| text(&d.record.publisher),
    },
    ColumnSpec {
        name: "precio",
        kind: ColumnKind::Float64,
        nullable: true,
        example: "35.99",
        description: "Google Books list price.",
        value: |d| CellValue::Float(d.record.price),
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn column_names_are_unique() {
        let dim: HashSet<&str> = DIM_BOOK_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(dim.len(), DIM_BOOK_COLUMNS.len());
        let detail: HashSet<&str> = SOURCE_DETAIL_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(detail.len(), SOURCE_DETAIL_COLUMNS.len());
    }

    #[test]
    fn dim_book_column_order() {
        let names: Vec<&str> = DIM_BOOK_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "book_id",
                "titulo",
                "titulo_normalizado",
                "autor_principal",
                "autores",
                "editorial",
                "anio_publicacion",
                "fecha_publicacion",
                "idioma",
                "isbn10",
                "isbn13",
                "precio",
                "moneda",
                "ts_ultima_actualizacion",
            ]
        );
    }
}
