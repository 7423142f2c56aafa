//! Data quality reporting for source record sets.
//!
//! Reports are computed over any [`QualityRows`] implementation and never
//! mutate their input.

mod columns;
mod report;

pub use columns::{GOODREADS_COLUMNS, GOOGLE_BOOKS_COLUMNS, QualityRows};
pub use report::{ColumnMap, PipelineQualityReport, SourceQualityReport, quality_report};
