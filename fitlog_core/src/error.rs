//! Error types for the fitlog_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A persisted collection could not be read or parsed.
    ///
    /// The store recovers from this locally; it never reaches callers of `load`.
    #[error("Failed to read {path:?}: {reason}")]
    StorageRead { path: PathBuf, reason: String },

    /// A collection could not be written to disk
    #[error("Failed to write {path:?}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Out-of-range or malformed user input
    #[error("Invalid input: {0}")]
    Validation(String),
}
