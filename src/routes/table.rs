//! Path to destination lookup tables.
//!
//! # Responsibilities
//! - Validate individual `(path, destination)` records
//! - Collapse a batch of records into an immutable lookup table
//!
//! # Design Decisions
//! - Duplicate paths inside one batch: the later record wins
//! - No mutation after construction (shared across tasks without locks)

use std::collections::HashMap;

use axum::http::HeaderValue;
use serde::Deserialize;
use url::Url;

use crate::routes::error::RouteError;

/// Record shape shared by every structured source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoute {
    pub path: String,
    pub url: String,
}

/// A validated short path and the absolute URL it redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRoute {
    path: String,
    destination: String,
}

impl PathRoute {
    /// Validate and build a route.
    pub fn new(path: impl Into<String>, destination: impl Into<String>) -> Result<Self, RouteError> {
        let path = path.into();
        let destination = destination.into();

        if !path.starts_with('/') {
            return Err(RouteError::RelativePath(path));
        }

        if let Err(e) = Url::parse(&destination) {
            return Err(RouteError::InvalidDestination {
                destination,
                reason: e.to_string(),
            });
        }

        // Must be usable verbatim as a Location header.
        if HeaderValue::from_str(&destination).is_err() {
            return Err(RouteError::InvalidDestination {
                destination,
                reason: "contains characters not allowed in a header".to_string(),
            });
        }

        Ok(Self { path, destination })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}

impl TryFrom<RawRoute> for PathRoute {
    type Error = RouteError;

    fn try_from(raw: RawRoute) -> Result<Self, Self::Error> {
        PathRoute::new(raw.path, raw.url)
    }
}

/// Immutable path → destination map built from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: HashMap<String, String>,
}

impl RouteTable {
    /// Build a table from a batch of routes; later duplicates overwrite earlier ones.
    pub fn from_routes<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = PathRoute>,
    {
        let mut entries = HashMap::new();
        for route in routes {
            entries.insert(route.path, route.destination);
        }
        Self { entries }
    }

    /// Destination for `path`, if this table knows it.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PathRoute> for RouteTable {
    fn from_iter<T: IntoIterator<Item = PathRoute>>(iter: T) -> Self {
        Self::from_routes(iter)
    }
}
