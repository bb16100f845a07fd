//! Error types shared across the catalog, cache and lookup layers.
use thiserror::Error;

/// Failures talking to the remote catalog.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Catalog endpoint answered with a non-success status
    #[error("Catalog endpoint returned HTTP {0}")]
    Status(u16),

    /// Body was not a product array or a `results` envelope
    #[error("Failed to decode catalog payload: {0}")]
    Decode(String),
}

impl SourceError {
    /// Whether a retry has any chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Network(_) | SourceError::Timeout(_) => true,
            SourceError::Status(code) => *code >= 500 || *code == 429,
            SourceError::Decode(_) => false,
        }
    }
}

/// Errors from the persisted key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// No fresh cache entry and the remote fetch failed.
    #[error("Catalog unavailable: {0}")]
    Unavailable(#[source] SourceError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}
