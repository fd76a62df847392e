//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routes::SourceFormat;
use crate::routing::RedirectStatus;

/// Root configuration for the shortener.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShortenerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// SQLite route table.
    pub database: DatabaseConfig,

    /// Redirect behaviour.
    pub redirect: RedirectConfig,

    /// Response of the base handler.
    pub fallback: FallbackConfig,

    /// File-provided overrides, lowest precedence first.
    pub sources: Vec<SourceConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Database route source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Consult the database at all.
    pub enabled: bool,

    /// Path to the SQLite file.
    pub path: PathBuf,

    /// Table holding `(path, url)` rows.
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("data/urls.db"),
            table: "urls".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectConfig {
    /// HTTP status for matched paths (301, 302, 307 or 308).
    pub status: RedirectStatus,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Plain-text body served when no source matches.
    pub body: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            body: "Hello, world!\n".to_string(),
        }
    }
}

/// One route file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SourceConfig {
    pub path: PathBuf,

    /// Inferred from the file extension when absent.
    #[serde(default)]
    pub format: Option<SourceFormat>,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>, format: Option<SourceFormat>) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Explicit format, or the one implied by the extension.
    pub fn resolved_format(&self) -> Option<SourceFormat> {
        self.format.or_else(|| SourceFormat::from_path(&self.path))
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
