//! Error types for manifest loading.

use thiserror::Error;

/// Errors that can occur while fetching or parsing a collection manifest.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Manifest host answered with a non-success status
    #[error("Manifest host error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Manifest host is offline or unreachable
    #[error("Manifest host unreachable: {0}")]
    Unreachable(String),

    /// Invalid manifest URL
    #[error("Invalid manifest URL: {0}")]
    InvalidUrl(String),

    /// IO error reading a manifest file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest is not a JSON object of collections
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// One collection entry has the wrong shape
    #[error("Invalid collection entry '{id}': {source}")]
    InvalidEntry {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
