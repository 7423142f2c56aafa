//! Markdown documentation of the output tables.

use std::fmt::Write;

use crate::columns::{ColumnSpec, DIM_BOOK_COLUMNS, SOURCE_DETAIL_COLUMNS};

const OVERVIEW: &str = "\
`dim_book` holds one row per book, keyed by `book_id`. It is rebuilt from the \
landing zone on every run: Goodreads search results are joined to Google Books \
volumes on exact title, normalized, assigned an identity and deduplicated.

## Identity

1. `isbn13` when a checksum-valid ISBN-13 survives normalization.
2. Otherwise the lowercase hex SHA-256 of `titulo_normalizado`, \
`autor_principal`, `editorial` and `anio_publicacion` concatenated, with the \
literal `null` standing in for missing values.

## Survivorship

- Rows matched to a Google Books volume beat Goodreads-only rows for the same \
`book_id`. Among equal rows the first in input order wins.
- Title, authors and ISBNs prefer Google Books and fall back to Goodreads.
- Publisher, publication date, language, price and currency come from Google \
Books only.
- Values that fail validation are stored as null.
";

/// Render `docs/schema.md`.
pub fn render_schema_markdown() -> String {
    let mut out = String::new();
    out.push_str("# Schema: `dim_book`\n\n");
    out.push_str(OVERVIEW);
    out.push_str("\n## `dim_book` fields\n\n");
    push_table(&mut out, DIM_BOOK_COLUMNS);
    out.push_str(
        "\n## `book_source_detail` fields\n\n\
         Every joined record before deduplication, with the raw fields of both \
         sources and the normalized fields used for identity.\n\n",
    );
    push_table(&mut out, SOURCE_DETAIL_COLUMNS);
    out
}

fn push_table<T>(out: &mut String, specs: &[ColumnSpec<T>]) {
    out.push_str("| Field | Type | Nullable | Example | Description |\n");
    out.push_str("| --- | --- | --- | --- | --- |\n");
    for spec in specs {
        let _ = writeln!(
            out,
            "| `{}` | `{}` | {} | `{}` | {} |",
            spec.name,
            spec.kind.type_name(),
            if spec.nullable { "yes" } else { "no" },
            spec.example,
            spec.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_column() {
        let markdown = render_schema_markdown();
        for spec in DIM_BOOK_COLUMNS {
            assert!(markdown.contains(&format!("| `{}` |", spec.name)), "{}", spec.name);
        }
        for spec in SOURCE_DETAIL_COLUMNS {
            assert!(markdown.contains(&format!("| `{}` |", spec.name)), "{}", spec.name);
        }
    }

    #[test]
    fn dim_book_rows() {
        let markdown = render_schema_markdown();
        assert!(markdown.starts_with("# Schema: `dim_book`\n"));
        assert!(markdown.contains(
            "| `anio_publicacion` | `int32` | yes | `2008` | Year of `fecha_publicacion`. |"
        ));
        assert!(markdown.contains(
            "| `autores` | `list<string>` | no | `[\"Robert C. Martin\"]` |"
        ));
    }
}
