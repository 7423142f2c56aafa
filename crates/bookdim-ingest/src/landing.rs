//! Landing zone files.
//!
//! | File                     | Format                                 |
//! |--------------------------|----------------------------------------|
//! | `goodreads_books.json`   | JSON array of Goodreads records        |
//! | `googlebooks_books.csv`  | `;` separated CSV with a header row    |

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

use bookdim_model::{GoodreadsRecord, GoogleBooksRecord};

use crate::error::{IngestError, Result};

/// Goodreads scraper output.
pub const GOODREADS_FILE: &str = "goodreads_books.json";
/// Google Books enricher output.
pub const GOOGLE_BOOKS_FILE: &str = "googlebooks_books.csv";

const CSV_DELIMITER: u8 = b';';

const GOOGLE_BOOKS_HEADER: [&str; 12] = [
    "gb_id",
    "title",
    "subtitle",
    "authors",
    "publisher",
    "pub_date",
    "language",
    "categories",
    "isbn13",
    "isbn10",
    "price_amount",
    "price_currency",
];

/// Both raw record sets read from a landing directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandingSources {
    pub goodreads: Vec<GoodreadsRecord>,
    pub google_books: Vec<GoogleBooksRecord>,
}

/// Read both landing files.
///
/// Both files are checked before either is read, so a partially populated
/// landing directory fails without doing any work.
pub fn load_sources(landing_dir: &Path) -> Result<LandingSources> {
    let goodreads_path = landing_dir.join(GOODREADS_FILE);
    let google_books_path = landing_dir.join(GOOGLE_BOOKS_FILE);
    require_file(&goodreads_path, "scrape")?;
    require_file(&google_books_path, "enrich")?;

    let sources = LandingSources {
        goodreads: load_goodreads(&goodreads_path)?,
        google_books: load_google_books(&google_books_path)?,
    };
    info!(
        landing_dir = %landing_dir.display(),
        goodreads = sources.goodreads.len(),
        google_books = sources.google_books.len(),
        "loaded landing sources"
    );
    Ok(sources)
}

/// Read the scraper output alone, as the enricher does.
pub fn load_scraped(landing_dir: &Path) -> Result<Vec<GoodreadsRecord>> {
    let path = landing_dir.join(GOODREADS_FILE);
    require_file(&path, "scrape")?;
    load_goodreads(&path)
}

fn require_file(path: &Path, command: &'static str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::MissingSource {
            path: path.to_path_buf(),
            command,
        })
    }
}

/// Read a Goodreads JSON array.
pub fn load_goodreads(path: &Path) -> Result<Vec<GoodreadsRecord>> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<GoodreadsRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), records = records.len(), "read goodreads records");
    Ok(records)
}

/// Read a `;` separated Google Books CSV.
pub fn load_google_books(path: &Path) -> Result<Vec<GoogleBooksRecord>> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_path(path)
        .map_err(csv_error)?;
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<GoogleBooksRecord>, _>>()
        .map_err(csv_error)?;
    debug!(path = %path.display(), records = records.len(), "read google books records");
    Ok(records)
}

/// Write Goodreads records as an indented JSON array, creating `landing_dir`.
pub fn write_goodreads(landing_dir: &Path, records: &[GoodreadsRecord]) -> Result<PathBuf> {
    ensure_dir(landing_dir)?;
    let path = landing_dir.join(GOODREADS_FILE);
    let write_error = |source| IngestError::FileWrite {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .map_err(|source| IngestError::Json {
            path: path.clone(),
            source,
        })?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    info!(path = %path.display(), records = records.len(), "wrote goodreads records");
    Ok(path)
}

/// Write Google Books records as a `;` separated CSV, creating `landing_dir`.
///
/// The header row is written even when there are no records.
pub fn write_google_books(landing_dir: &Path, records: &[GoogleBooksRecord]) -> Result<PathBuf> {
    ensure_dir(landing_dir)?;
    let path = landing_dir.join(GOOGLE_BOOKS_FILE);
    let csv_error = |source| IngestError::Csv {
        path: path.clone(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(false)
        .from_path(&path)
        .map_err(csv_error)?;
    writer.write_record(GOOGLE_BOOKS_HEADER).map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), records = records.len(), "wrote google books records");
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| IngestError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
