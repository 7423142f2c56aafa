//! CLI argument definitions for the book dimension pipeline.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bookdim_model::{DEFAULT_MAX_RESULTS, DEFAULT_QUERY};
use bookdim_sources::RetryPolicy;

#[derive(Parser)]
#[command(
    name = "bookdim",
    version,
    about = "Build a canonical book dimension from Goodreads and Google Books",
    long_about = "Scrape Goodreads search results, enrich them with Google Books volumes \
                  and integrate both into a deduplicated book dimension.\n\n\
                  Writes standard/dim_book.parquet, standard/book_source_detail.parquet, \
                  docs/quality_metrics.json and docs/schema.md."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search Goodreads and write landing/goodreads_books.json.
    Scrape(ScrapeArgs),

    /// Look the scraped books up in Google Books and write landing/googlebooks_books.csv.
    Enrich(EnrichArgs),

    /// Integrate the landing files and write the dimension artifacts.
    Integrate(IntegrateArgs),

    /// Print quality profiles of the landing files.
    Quality(LandingArgs),

    /// Scrape, enrich and integrate in one go.
    Run(RunArgs),
}

#[derive(Args)]
pub struct LandingArgs {
    /// Directory holding the raw source files.
    #[arg(long = "landing-dir", value_name = "DIR", default_value = "landing")]
    pub landing_dir: PathBuf,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Goodreads search query.
    #[arg(long = "query", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Maximum number of books to collect.
    #[arg(long = "max-results", value_name = "N", default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,
}

#[derive(Args)]
pub struct HttpArgs {
    /// Attempts per HTTP request.
    #[arg(long = "retries", value_name = "N", default_value_t = 3)]
    pub retries: u32,

    /// Base backoff between attempts, doubled after each failure.
    #[arg(long = "backoff-ms", value_name = "MS", default_value_t = 500)]
    pub backoff_ms: u64,

    /// Per-request timeout.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl HttpArgs {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            backoff: Duration::from_millis(self.backoff_ms),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Args)]
pub struct ApiKeyArgs {
    /// Google Books API key.
    #[arg(long = "api-key", env = "GOOGLE_BOOKS_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Root directory receiving standard/ and docs/.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct ScrapeArgs {
    #[command(flatten)]
    pub landing: LandingArgs,
    #[command(flatten)]
    pub search: SearchArgs,
    #[command(flatten)]
    pub http: HttpArgs,
}

#[derive(Parser)]
pub struct EnrichArgs {
    #[command(flatten)]
    pub landing: LandingArgs,
    #[command(flatten)]
    pub api_key: ApiKeyArgs,
    #[command(flatten)]
    pub http: HttpArgs,
}

#[derive(Parser)]
pub struct IntegrateArgs {
    #[command(flatten)]
    pub landing: LandingArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub landing: LandingArgs,
    #[command(flatten)]
    pub search: SearchArgs,
    #[command(flatten)]
    pub api_key: ApiKeyArgs,
    #[command(flatten)]
    pub http: HttpArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
