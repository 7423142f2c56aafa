//! Error types for upstream sources.

use thiserror::Error;

/// Errors raised while talking to Goodreads or Google Books.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A URL could not be assembled from its parts.
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// A request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Every attempt allowed by the retry policy failed.
    #[error("giving up on {url} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    /// A response body was not the expected JSON document.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Whether another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Status { .. })
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
