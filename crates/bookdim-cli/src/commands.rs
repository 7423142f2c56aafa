use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info_span;

use bookdim_cli::pipeline::{
    EnrichResult, ScrapeResult, baseline_quality, enrich_google_books, ingest, integrate, output,
    pipeline_quality, scrape_goodreads,
};
use bookdim_model::ScrapeConfig;
use bookdim_output::OutputLayout;
use bookdim_sources::{GoodreadsScraper, GoogleBooksClient, HttpFetcher};

use crate::cli::{EnrichArgs, HttpArgs, IntegrateArgs, LandingArgs, RunArgs, ScrapeArgs, SearchArgs};
use crate::types::{IntegrateSummary, QualitySummary, RunSummary};

pub fn run_scrape(args: &ScrapeArgs) -> Result<ScrapeResult> {
    scrape(&args.search, &args.http, &args.landing.landing_dir)
}

pub fn run_enrich(args: &EnrichArgs) -> Result<EnrichResult> {
    enrich(&args.api_key.api_key, &args.http, &args.landing.landing_dir)
}

pub fn run_integrate(args: &IntegrateArgs) -> Result<IntegrateSummary> {
    integrate_landing(&args.landing.landing_dir, &args.output.output_dir)
}

pub fn run_quality(args: &LandingArgs) -> Result<QualitySummary> {
    let sources = ingest(&args.landing_dir)?;
    Ok(QualitySummary {
        landing_dir: args.landing_dir.clone(),
        baseline: baseline_quality(&sources),
    })
}

pub fn run_all(args: &RunArgs) -> Result<RunSummary> {
    let span = info_span!("run", landing_dir = %args.landing.landing_dir.display());
    let _guard = span.enter();
    let scrape = scrape(&args.search, &args.http, &args.landing.landing_dir)?;
    let enrich = enrich(&args.api_key.api_key, &args.http, &args.landing.landing_dir)?;
    let integrate = integrate_landing(&args.landing.landing_dir, &args.output.output_dir)?;
    Ok(RunSummary {
        scrape,
        enrich,
        integrate,
    })
}

fn scrape(search: &SearchArgs, http: &HttpArgs, landing_dir: &Path) -> Result<ScrapeResult> {
    let config = ScrapeConfig::new(search.query.as_str(), search.max_results)
        .context("invalid scrape configuration")?;
    let fetcher = HttpFetcher::new(http.retry_policy()).context("build http client")?;
    let scraper = GoodreadsScraper::new(fetcher);
    scrape_goodreads(&scraper, &config, landing_dir)
}

fn enrich(api_key: &str, http: &HttpArgs, landing_dir: &Path) -> Result<EnrichResult> {
    let fetcher = HttpFetcher::new(http.retry_policy()).context("build http client")?;
    let client = GoogleBooksClient::new(fetcher, api_key);
    enrich_google_books(&client, landing_dir)
}

fn integrate_landing(landing_dir: &Path, output_dir: &Path) -> Result<IntegrateSummary> {
    let sources = ingest(landing_dir)?;
    let baseline = baseline_quality(&sources);
    let integration = integrate(&sources, Utc::now());
    let quality = pipeline_quality(baseline, &integration);
    let paths = output(&integration, &quality, &OutputLayout::under(output_dir))?;

    let matched_rows = integration
        .source_detail
        .iter()
        .filter(|detail| detail.record.merged.has_google_match())
        .count();
    let hash_keyed_rows = integration
        .dim_book
        .iter()
        .filter(|book| book.book_id.is_hash_fallback())
        .count();
    Ok(IntegrateSummary {
        landing_dir: landing_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        detail_rows: integration.source_detail.len(),
        matched_rows,
        dim_rows: integration.dim_book.len(),
        hash_keyed_rows,
        quality,
        paths,
    })
}
