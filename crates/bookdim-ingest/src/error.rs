//! Error types for landing zone I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing landing files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A source file is absent from the landing directory.
    #[error("source file not found: {path} (run `{command}` first)")]
    MissingSource {
        path: PathBuf,
        /// Command that produces the file.
        command: &'static str,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
