use std::collections::HashSet;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::columns::QualityRows;

/// Column-ordered map that serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap<T>(Vec<(String, T)>);

impl<T> ColumnMap<T> {
    pub fn get(&self, column: &str) -> Option<&T> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for ColumnMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for ColumnMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Quality statistics for one source record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceQualityReport {
    #[serde(rename = "fuente")]
    pub source: String,
    #[serde(rename = "filas_totales")]
    pub total_rows: usize,
    #[serde(rename = "nulos_por_columna")]
    pub null_counts: ColumnMap<usize>,
    /// Null share per column rendered with two decimals and a percent sign.
    #[serde(rename = "porcentaje_nulos_por_columna")]
    pub null_percentages: ColumnMap<String>,
    /// Rows byte-equal to an earlier row.
    #[serde(rename = "filas_duplicadas")]
    pub duplicate_rows: usize,
}

impl SourceQualityReport {
    /// Columns with at least one null cell.
    pub fn columns_with_nulls(&self) -> usize {
        self.null_counts.iter().filter(|(_, count)| **count > 0).count()
    }
}

/// Aggregated report written next to the dimension table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineQualityReport {
    #[serde(rename = "fuentes")]
    pub sources: Vec<SourceQualityReport>,
    #[serde(rename = "duplicados_encontrados")]
    pub duplicates_found: usize,
    #[serde(rename = "total_libros_en_dimension")]
    pub dimension_size: usize,
}

impl PipelineQualityReport {
    pub fn new(
        goodreads: SourceQualityReport,
        google_books: SourceQualityReport,
        duplicates_found: usize,
        dimension_size: usize,
    ) -> Self {
        Self {
            sources: vec![goodreads, google_books],
            duplicates_found,
            dimension_size,
        }
    }
}

/// Compute row count, per-column nulls and full-row duplicates.
pub fn quality_report<R: QualityRows>(source: &str, rows: &[R]) -> SourceQualityReport {
    let columns = R::COLUMNS;
    let mut nulls = vec![0usize; columns.len()];
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(rows.len());
    let mut duplicate_rows = 0usize;

    for row in rows {
        let cells = row.cells();
        for (idx, cell) in cells.iter().enumerate().take(columns.len()) {
            if cell.is_none() {
                nulls[idx] += 1;
            }
        }
        if !seen.insert(cells) {
            duplicate_rows += 1;
        }
    }

    let total_rows = rows.len();
    SourceQualityReport {
        source: source.to_string(),
        total_rows,
        null_counts: columns
            .iter()
            .zip(&nulls)
            .map(|(name, count)| ((*name).to_string(), *count))
            .collect(),
        null_percentages: columns
            .iter()
            .zip(&nulls)
            .map(|(name, count)| ((*name).to_string(), format_percentage(*count, total_rows)))
            .collect(),
        duplicate_rows,
    }
}

fn format_percentage(count: usize, total: usize) -> String {
    let share = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    };
    format!("{share:.2}%")
}
