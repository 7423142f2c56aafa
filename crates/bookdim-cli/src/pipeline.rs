//! Book dimension pipeline with explicit stages.
//!
//! The stages run in this order:
//! 1. **Scrape**: search Goodreads and land `goodreads_books.json`
//! 2. **Enrich**: look every scraped book up in Google Books and land
//!    `googlebooks_books.csv`
//! 3. **Ingest**: read both landing files back
//! 4. **Integrate**: join, normalize, identify and deduplicate
//! 5. **Quality**: profile the raw inputs and the integration counts
//! 6. **Output**: write the Parquet tables and the documentation
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, info_span};

use bookdim_core::IntegrationOutput;
use bookdim_ingest::{LandingSources, load_scraped, load_sources, write_goodreads, write_google_books};
use bookdim_model::{GoodreadsRecord, GoogleBooksRecord, ScrapeConfig};
use bookdim_output::{ArtifactPaths, OutputLayout, write_artifacts};
use bookdim_quality::{PipelineQualityReport, SourceQualityReport, quality_report};
use bookdim_sources::{GoodreadsScraper, PageFetcher, VolumeLookup};

// ============================================================================
// Stage 1: Scrape
// ============================================================================

/// Result of the scrape stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    pub books: usize,
    pub path: PathBuf,
}

/// Scrape Goodreads and write the landing JSON.
pub fn scrape_goodreads<F: PageFetcher>(
    scraper: &GoodreadsScraper<F>,
    config: &ScrapeConfig,
    landing_dir: &Path,
) -> Result<ScrapeResult> {
    let span = info_span!("scrape", query = %config.query, max_results = config.max_results);
    let _guard = span.enter();
    let start = Instant::now();
    let records = scraper.scrape(config);
    let path = write_goodreads(landing_dir, &records).context("land goodreads records")?;
    info!(
        books = records.len(),
        path = %path.display(),
        duration_ms = start.elapsed().as_millis(),
        "scrape complete"
    );
    Ok(ScrapeResult {
        books: records.len(),
        path,
    })
}

// ============================================================================
// Stage 2: Enrich
// ============================================================================

/// Result of the enrich stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichResult {
    pub books: usize,
    pub matched: usize,
    pub path: PathBuf,
}

/// Look up every landed Goodreads book and write the landing CSV.
pub fn enrich_google_books(lookup: &impl VolumeLookup, landing_dir: &Path) -> Result<EnrichResult> {
    let span = info_span!("enrich", landing_dir = %landing_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let books = load_scraped(landing_dir).context("read scrape output")?;
    let volumes = bookdim_sources::enrich(lookup, &books);
    let path = write_google_books(landing_dir, &volumes).context("land google books records")?;
    info!(
        books = books.len(),
        matched = volumes.len(),
        path = %path.display(),
        duration_ms = start.elapsed().as_millis(),
        "enrich complete"
    );
    Ok(EnrichResult {
        books: books.len(),
        matched: volumes.len(),
        path,
    })
}

// ============================================================================
// Stage 3: Ingest
// ============================================================================

/// Read both landing files. Fails before any transformation if one is missing.
pub fn ingest(landing_dir: &Path) -> Result<LandingSources> {
    let span = info_span!("ingest", landing_dir = %landing_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let sources = load_sources(landing_dir).context("load landing zone")?;
    info!(
        goodreads = sources.goodreads.len(),
        google_books = sources.google_books.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(sources)
}

// ============================================================================
// Stage 4: Integrate
// ============================================================================

/// Run the merge engine over the landed records.
pub fn integrate(sources: &LandingSources, run_ts: DateTime<Utc>) -> IntegrationOutput {
    let span = info_span!("integrate");
    let _guard = span.enter();
    let start = Instant::now();
    let output = bookdim_core::integrate(&sources.goodreads, &sources.google_books, run_ts);
    info!(
        detail_rows = output.source_detail.len(),
        dim_rows = output.dim_book.len(),
        duplicates = output.duplicates_found,
        duration_ms = start.elapsed().as_millis(),
        "integrate complete"
    );
    output
}

// ============================================================================
// Stage 5: Quality
// ============================================================================

/// Per-source profiles of the raw landed records.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineQuality {
    pub goodreads: SourceQualityReport,
    pub google_books: SourceQualityReport,
}

/// Profile both raw record sets.
pub fn baseline_quality(sources: &LandingSources) -> BaselineQuality {
    BaselineQuality {
        goodreads: quality_report(GoodreadsRecord::SOURCE.display_name(), &sources.goodreads),
        google_books: quality_report(GoogleBooksRecord::SOURCE.display_name(), &sources.google_books),
    }
}

/// Combine the baseline profiles with the integration counts.
pub fn pipeline_quality(baseline: BaselineQuality, output: &IntegrationOutput) -> PipelineQualityReport {
    PipelineQualityReport::new(
        baseline.goodreads,
        baseline.google_books,
        output.duplicates_found,
        output.dim_book.len(),
    )
}

// ============================================================================
// Stage 6: Output
// ============================================================================

/// Write every artifact under `layout`.
pub fn output(
    integration: &IntegrationOutput,
    quality: &PipelineQualityReport,
    layout: &OutputLayout,
) -> Result<ArtifactPaths> {
    let span = info_span!("output", standard_dir = %layout.standard_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let paths = write_artifacts(integration, quality, layout).context("write artifacts")?;
    info!(duration_ms = start.elapsed().as_millis(), "output complete");
    Ok(paths)
}
