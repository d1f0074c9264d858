//! Error types for upmscan-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using upmscan-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised inside the pipeline.
///
/// These never escape the public query surface; [`crate::PackageCatalog`]
/// turns each one into a [`crate::Diagnostic`] and an empty result.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parse error in {file}: {source}")]
    Json {
        /// File that failed to parse
        file: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Manifest file not found
    #[error("Manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Package cache directory not found
    #[error("Package cache directory not found: {0}")]
    CacheNotFound(PathBuf),

    /// Document parsed but has the wrong shape
    #[error("Invalid file format for {0}: {1}")]
    InvalidFormat(PathBuf, String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
