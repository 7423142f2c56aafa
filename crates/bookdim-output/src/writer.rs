//! Artifact writers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, ParquetWriter};
use serde::Serialize;
use tracing::{debug, info};

use bookdim_core::IntegrationOutput;
use bookdim_quality::PipelineQualityReport;

use crate::frames::{dim_book_frame, source_detail_frame};
use crate::schema::render_schema_markdown;

pub const DIM_BOOK_FILE: &str = "dim_book.parquet";
pub const SOURCE_DETAIL_FILE: &str = "book_source_detail.parquet";
pub const QUALITY_METRICS_FILE: &str = "quality_metrics.json";
pub const SCHEMA_FILE: &str = "schema.md";

/// Directories receiving the tables and the documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub standard_dir: PathBuf,
    pub docs_dir: PathBuf,
}

impl OutputLayout {
    /// `standard/` and `docs/` under `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            standard_dir: root.join("standard"),
            docs_dir: root.join("docs"),
        }
    }
}

/// Files produced by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub dim_book: PathBuf,
    pub source_detail: PathBuf,
    pub quality_metrics: PathBuf,
    pub schema: PathBuf,
}

impl ArtifactPaths {
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            self.dim_book.as_path(),
            self.source_detail.as_path(),
            self.quality_metrics.as_path(),
            self.schema.as_path(),
        ]
        .into_iter()
    }
}

/// Write both tables, the quality report and the schema document.
pub fn write_artifacts(
    output: &IntegrationOutput,
    quality: &PipelineQualityReport,
    layout: &OutputLayout,
) -> Result<ArtifactPaths> {
    ensure_dir(&layout.standard_dir)?;
    ensure_dir(&layout.docs_dir)?;

    let paths = ArtifactPaths {
        dim_book: layout.standard_dir.join(DIM_BOOK_FILE),
        source_detail: layout.standard_dir.join(SOURCE_DETAIL_FILE),
        quality_metrics: layout.docs_dir.join(QUALITY_METRICS_FILE),
        schema: layout.docs_dir.join(SCHEMA_FILE),
    };

    let mut dim = dim_book_frame(&output.dim_book)?;
    write_parquet(&mut dim, &paths.dim_book)?;
    let mut detail = source_detail_frame(&output.source_detail)?;
    write_parquet(&mut detail, &paths.source_detail)?;
    write_quality_metrics(quality, &paths.quality_metrics)?;
    fs::write(&paths.schema, render_schema_markdown())
        .with_context(|| format!("write {}", paths.schema.display()))?;

    info!(
        dim_rows = dim.height(),
        detail_rows = detail.height(),
        standard_dir = %layout.standard_dir.display(),
        docs_dir = %layout.docs_dir.display(),
        "artifacts written"
    );
    Ok(paths)
}

/// Write a frame as a Parquet file, replacing any existing file.
pub fn write_parquet(data: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(data)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = data.height(), "parquet written");
    Ok(())
}

/// Write the quality report as pretty JSON with four-space indentation.
pub fn write_quality_metrics(report: &PipelineQualityReport, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    report
        .serialize(&mut serializer)
        .with_context(|| format!("serialize {}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}
