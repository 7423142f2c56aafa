use std::path::PathBuf;

use bookdim_cli::pipeline::{BaselineQuality, EnrichResult, ScrapeResult};
use bookdim_output::ArtifactPaths;
use bookdim_quality::PipelineQualityReport;

#[derive(Debug)]
pub struct IntegrateSummary {
    pub landing_dir: PathBuf,
    pub output_dir: PathBuf,
    pub detail_rows: usize,
    /// Detail rows joined to a Google Books volume.
    pub matched_rows: usize,
    pub dim_rows: usize,
    /// Dimension rows keyed by the hash fallback instead of an ISBN-13.
    pub hash_keyed_rows: usize,
    pub quality: PipelineQualityReport,
    pub paths: ArtifactPaths,
}

#[derive(Debug)]
pub struct RunSummary {
    pub scrape: ScrapeResult,
    pub enrich: EnrichResult,
    pub integrate: IntegrateSummary,
}

#[derive(Debug)]
pub struct QualitySummary {
    pub landing_dir: PathBuf,
    pub baseline: BaselineQuality,
}
