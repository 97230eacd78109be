//! Error types for parley-spotlight

use std::path::PathBuf;

use thiserror::Error;

/// Result type for parley-spotlight operations
pub type Result<T> = std::result::Result<T, SpotlightError>;

/// Errors surfaced by the Spotlight dialog state
#[derive(Debug, Error)]
pub enum SpotlightError {
    /// Persisting dialog state failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Background work needs a Tokio runtime
    #[error("No Tokio runtime available: {0}")]
    NoRuntime(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors from key-value storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No platform data directory available")]
    NoDataDir,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode storage file: {0}")]
    Encode(#[from] serde_json::Error),
}
