//! Per-request redirect resolution.
//!
//! # Responsibilities
//! - Look the request path up in each stage, highest precedence first
//! - Build the redirect response for a match
//! - Define the terminal fallback behaviour for misses
//!
//! # Design Decisions
//! - A match stops resolution; fallback is exclusive, never additive
//! - Lookups are plain map reads, no locking and no I/O
//! - Stages are passed in lowest to highest precedence (composition order)

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::routes::RouteTable;

/// One composed source: a table plus a label for logs and metrics.
#[derive(Debug, Clone)]
pub struct Stage {
    pub table: Arc<RouteTable>,
    pub description: String,
}

impl Stage {
    pub fn new(table: RouteTable, description: impl Into<String>) -> Self {
        Self {
            table: Arc::new(table),
            description: description.into(),
        }
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A stage knows the path.
    Redirect {
        destination: &'a str,
        source: &'a str,
    },
    /// No stage knows the path; the fallback answers.
    Fallback,
}

/// Walk `stages` from the last-composed to the first and return the first hit.
pub fn resolve<'a>(stages: &'a [Stage], path: &str) -> Resolution<'a> {
    stages
        .iter()
        .rev()
        .find_map(|stage| {
            stage.table.get(path).map(|destination| Resolution::Redirect {
                destination,
                source: stage.description.as_str(),
            })
        })
        .unwrap_or(Resolution::Fallback)
}

/// Status code used for matched redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RedirectStatus {
    /// 301
    #[default]
    MovedPermanently,
    /// 302
    Found,
    /// 307
    TemporaryRedirect,
    /// 308
    PermanentRedirect,
}

impl RedirectStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::MovedPermanently => StatusCode::MOVED_PERMANENTLY,
            Self::Found => StatusCode::FOUND,
            Self::TemporaryRedirect => StatusCode::TEMPORARY_REDIRECT,
            Self::PermanentRedirect => StatusCode::PERMANENT_REDIRECT,
        }
    }
}

impl TryFrom<u16> for RedirectStatus {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            301 => Ok(Self::MovedPermanently),
            302 => Ok(Self::Found),
            307 => Ok(Self::TemporaryRedirect),
            308 => Ok(Self::PermanentRedirect),
            other => Err(format!("unsupported redirect status {other} (expected 301, 302, 307 or 308)")),
        }
    }
}

impl From<RedirectStatus> for u16 {
    fn from(status: RedirectStatus) -> Self {
        status.status_code().as_u16()
    }
}

/// Build the redirect response for a matched path.
pub fn redirect_response(destination: &str, status: RedirectStatus) -> Response {
    match HeaderValue::from_str(destination) {
        Ok(location) => (status.status_code(), [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            // Tables validate destinations, so this only trips on a bug upstream.
            tracing::error!(destination = %destination, error = %e, "Destination is not a valid Location header");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Terminal handler invoked when no stage matches.
pub trait Fallback: Send + Sync {
    fn respond(&self, request: &Request<Body>) -> Response;
}

impl<F> Fallback for F
where
    F: Fn(&Request<Body>) -> Response + Send + Sync,
{
    fn respond(&self, request: &Request<Body>) -> Response {
        self(request)
    }
}

/// Default base handler: a plain-text greeting with 200 OK.
#[derive(Debug, Clone)]
pub struct Greeting {
    body: String,
}

impl Greeting {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl Default for Greeting {
    fn default() -> Self {
        Self::new("Hello, world!\n")
    }
}

impl Fallback for Greeting {
    fn respond(&self, _request: &Request<Body>) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body.clone(),
        )
            .into_response()
    }
}
