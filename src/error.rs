/// Error types shared across the application
///
/// Errors that travel inside UI messages must be `Clone`, so wrapped
/// sources are kept as strings.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a project catalog
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("malformed catalog: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

/// Failure to read the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure to store or read the language preference
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("no configuration directory available")]
    NoConfigDir,

    #[error("preference I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
