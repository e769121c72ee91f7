//! Error types for prosefilter library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for prosefilter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for prosefilter library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    /// JSON serialization error (audit records).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input handed to the pipeline is inconsistent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external content-extraction step failed for a document.
    #[error("Extraction failed for {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    /// A worker task could not be joined.
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}
