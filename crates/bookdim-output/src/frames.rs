//! DataFrame construction from column definitions.

use anyhow::{Context, Result, bail};
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, PlSmallStr, Series};

use bookdim_model::{BookSourceDetail, CanonicalBook};

use crate::columns::{CellValue, ColumnKind, ColumnSpec, DIM_BOOK_COLUMNS, SOURCE_DETAIL_COLUMNS};

/// Build the `dim_book` frame.
pub fn dim_book_frame(books: &[CanonicalBook]) -> Result<DataFrame> {
    build_frame(DIM_BOOK_COLUMNS, books).context("build dim_book frame")
}

/// Build the `book_source_detail` frame.
pub fn source_detail_frame(details: &[BookSourceDetail]) -> Result<DataFrame> {
    build_frame(SOURCE_DETAIL_COLUMNS, details).context("build book_source_detail frame")
}

/// Build a frame with one column per spec, in spec order.
pub fn build_frame<T>(specs: &[ColumnSpec<T>], rows: &[T]) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(specs.len());
    for spec in specs {
        columns.push(build_column(spec, rows)?);
    }
    let data = DataFrame::new(columns).context("assemble dataframe")?;
    Ok(data)
}

fn build_column<T>(spec: &ColumnSpec<T>, rows: &[T]) -> Result<Column> {
    let name: PlSmallStr = spec.name.into();
    let cells = rows.iter().map(spec.value);
    let series = match spec.kind {
        ColumnKind::Text | ColumnKind::Timestamp => {
            let mut values: Vec<Option<String>> = Vec::with_capacity(rows.len());
            for cell in cells {
                match cell {
                    CellValue::Text(value) => values.push(value),
                    other => bail!("column {} expects text, got {other:?}", spec.name),
                }
            }
            Series::new(name, values)
        }
        ColumnKind::Int32 => {
            let mut values: Vec<Option<i32>> = Vec::with_capacity(rows.len());
            for cell in cells {
                match cell {
                    CellValue::Int(value) => values.push(value.and_then(|v| i32::try_from(v).ok())),
                    other => bail!("column {} expects an integer, got {other:?}", spec.name),
                }
            }
            Series::new(name, values)
        }
        ColumnKind::Int64 => {
            let mut values: Vec<Option<i64>> = Vec::with_capacity(rows.len());
            for cell in cells {
                match cell {
                    CellValue::Int(value) => values.push(value),
                    other => bail!("column {} expects an integer, got {other:?}", spec.name),
                }
            }
            Series::new(name, values)
        }
        ColumnKind::Float64 => {
            let mut values: Vec<Option<f64>> = Vec::with_capacity(rows.len());
            for cell in cells {
                match cell {
                    CellValue::Float(value) => values.push(value),
                    other => bail!("column {} expects a float, got {other:?}", spec.name),
                }
            }
            Series::new(name, values)
        }
        ColumnKind::TextList => {
            let mut values: Vec<Series> = Vec::with_capacity(rows.len());
            for cell in cells {
                match cell {
                    CellValue::List(items) => values.push(Series::new(PlSmallStr::EMPTY, items)),
                    other => bail!("column {} expects a list, got {other:?}", spec.name),
                }
            }
            // An empty frame has no element to infer the inner type from.
            Series::new(name, values)
                .cast(&DataType::List(Box::new(DataType::String)))
                .with_context(|| format!("cast {} to list<string>", spec.name))?
        }
    };
    Ok(series.into())
}
