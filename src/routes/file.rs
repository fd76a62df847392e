//! File-provided route overrides (YAML or JSON).
//!
//! Both formats decode to a top-level sequence of `{path, url}` records.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::routes::error::{LoadError, ParseError};
use crate::routes::table::{PathRoute, RawRoute, RouteTable};

/// Structured-text format of a route file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    /// Decode `content` into validated routes.
    ///
    /// `origin` is only used in error messages.
    pub fn decode(&self, content: &str, origin: &str) -> Result<Vec<PathRoute>, ParseError> {
        let raw: Vec<RawRoute> = match self {
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ParseError::new(self.as_str(), origin, e))?,
            Self::Json => serde_json::from_str(content)
                .map_err(|e| ParseError::new(self.as_str(), origin, e))?,
        };

        raw.into_iter()
            .enumerate()
            .map(|(i, record)| {
                PathRoute::try_from(record)
                    .map_err(|e| ParseError::new(self.as_str(), origin, format!("record {i}: {e}")))
            })
            .collect()
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and decode a route file into a table.
pub fn load_file(path: &Path, format: SourceFormat) -> Result<RouteTable, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let routes = format.decode(&content, &path.display().to_string())?;

    tracing::debug!(
        path = %path.display(),
        format = %format,
        records = routes.len(),
        "Route file decoded"
    );

    Ok(RouteTable::from_routes(routes))
}
