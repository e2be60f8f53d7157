//! Error types for crawling and for the collaborators around the pipeline.
//!
//! Nothing here is fatal to an analysis run. The pipeline logs a
//! [`CrawlError`] and skips whatever it was working on; the caller only ever
//! sees fewer records.

use thiserror::Error;

/// A failure while fetching or reading a page.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Connection-level failure: timeout, DNS, refused connection, broken body.
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },
    /// Markup or URL that could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}

impl CrawlError {
    pub fn network(url: &str, reason: impl std::fmt::Display) -> Self {
        CrawlError::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, CrawlError::Network { .. })
    }
}

/// A site catalog file that could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read site catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid site catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("site entry {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
    #[error("site catalog is empty")]
    NoSites,
}

/// A search-trend table that could not be produced.
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("failed to read trend table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid trend table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trend table has no column for keyword `{0}`")]
    MissingKeyword(String),
}
