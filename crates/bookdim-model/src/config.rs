//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Search query used when none is given.
pub const DEFAULT_QUERY: &str = "data science";

/// Number of books scraped when no limit is given.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// What to scrape from the review site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Free-text search query.
    pub query: String,
    /// Upper bound on the number of books collected.
    pub max_results: usize,
}

impl ScrapeConfig {
    /// Build a validated configuration.
    ///
    /// The query is whitespace-trimmed; an empty query or a zero limit is rejected.
    pub fn new(query: impl Into<String>, max_results: usize) -> Result<Self> {
        let query = query.into().trim().to_string();
        if query.is_empty() {
            return Err(ModelError::EmptyQuery);
        }
        if max_results == 0 {
            return Err(ModelError::ZeroMaxResults);
        }
        Ok(Self { query, max_results })
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = ScrapeConfig::default();
        assert_eq!(config.query, "data science");
        assert_eq!(config.max_results, 3);
    }

    #[test]
    fn new_trims_query() {
        let config = ScrapeConfig::new("  rust  ", 5).unwrap();
        assert_eq!(config.query, "rust");
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn new_rejects_invalid_values() {
        assert_eq!(ScrapeConfig::new("   ", 5), Err(ModelError::EmptyQuery));
        assert_eq!(ScrapeConfig::new("rust", 0), Err(ModelError::ZeroMaxResults));
    }
}
