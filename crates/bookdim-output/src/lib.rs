//! Artifact materializer.
//!
//! Writes the integration results to disk:
//!
//! - `standard/dim_book.parquet`
//! - `standard/book_source_detail.parquet`
//! - `docs/quality_metrics.json`
//! - `docs/schema.md`
//!
//! Table layouts come from the column definitions in [`columns`]; the
//! Parquet frames and the schema document are both rendered from them.

pub mod columns;
pub mod frames;
pub mod schema;
pub mod writer;

pub use columns::{CellValue, ColumnKind, ColumnSpec, DIM_BOOK_COLUMNS, SOURCE_DETAIL_COLUMNS};
pub use frames::{build_frame, dim_book_frame, source_detail_frame};
pub use schema::render_schema_markdown;
pub use writer::{ArtifactPaths, OutputLayout, write_artifacts, write_parquet, write_quality_metrics};
