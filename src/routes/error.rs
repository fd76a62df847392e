//! Error types for loading route sources.

use std::path::PathBuf;
use thiserror::Error;

/// A source could be read but its content does not describe a route list.
#[derive(Debug, Error)]
#[error("failed to parse {format} routes from {origin}: {reason}")]
pub struct ParseError {
    /// Format the decoder expected (`yaml`, `json`, `sqlite`).
    pub format: &'static str,
    /// Human readable origin of the data (usually a file path).
    pub origin: String,
    /// Decoder or validation message.
    pub reason: String,
}

impl ParseError {
    pub fn new(format: &'static str, origin: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            format,
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}

/// A route source could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database error on {}: {source}", path.display())]
    Database {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Why a single record was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("path {0:?} must start with '/'")]
    RelativePath(String),

    #[error("destination {destination:?} is not an absolute URL: {reason}")]
    InvalidDestination { destination: String, reason: String },
}
