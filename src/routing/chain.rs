//! Handler chain composition.
//!
//! Stages are appended in composition order: the base handler sits at the
//! bottom, every added stage wraps the previous ones. The most recently
//! added stage is consulted first; a miss cascades down to the base
//! handler.

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use percent_encoding::percent_decode_str;

use crate::observability::metrics;
use crate::routes::RouteTable;
use crate::routing::resolver::{self, Fallback, Greeting, RedirectStatus, Resolution, Stage};

/// Ordered stages over a terminal fallback. Immutable once built.
#[derive(Clone)]
pub struct HandlerChain {
    stages: Vec<Stage>,
    fallback: Arc<dyn Fallback>,
    status: RedirectStatus,
}

impl HandlerChain {
    /// Chain containing only the base handler.
    pub fn new(fallback: impl Fallback + 'static) -> Self {
        Self {
            stages: Vec::new(),
            fallback: Arc::new(fallback),
            status: RedirectStatus::default(),
        }
    }

    /// Wrap the current chain with a new stage; it takes precedence over all existing ones.
    pub fn with_stage(mut self, table: RouteTable, description: impl Into<String>) -> Self {
        self.push_stage(table, description);
        self
    }

    pub fn push_stage(&mut self, table: RouteTable, description: impl Into<String>) {
        let stage = Stage::new(table, description);
        metrics::record_stage_loaded(&stage.description, stage.table.len());
        tracing::info!(
            source = %stage.description,
            routes = stage.table.len(),
            precedence = self.stages.len() + 1,
            "Route stage composed"
        );
        self.stages.push(stage);
    }

    pub fn with_status(mut self, status: RedirectStatus) -> Self {
        self.status = status;
        self
    }

    /// Stages in composition order (lowest precedence first).
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn status(&self) -> RedirectStatus {
        self.status
    }

    /// Resolve a path without producing a response.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        resolver::resolve(&self.stages, path)
    }

    /// Answer one request: redirect on a match, otherwise delegate to the fallback.
    pub fn handle(&self, request: &Request<Body>) -> Response {
        let raw = request.uri().path();

        // Tables are keyed by decoded paths; undecodable input can't match.
        let resolution = match percent_decode_str(raw).decode_utf8() {
            Ok(path) => self.resolve(&path),
            Err(e) => {
                tracing::debug!(path = %raw, error = %e, "Request path is not valid UTF-8 once decoded");
                Resolution::Fallback
            }
        };

        match resolution {
            Resolution::Redirect { destination, source } => {
                tracing::debug!(path = %raw, destination = %destination, source = %source, "Redirecting");
                metrics::record_resolution("redirect", source);
                resolver::redirect_response(destination, self.status)
            }
            Resolution::Fallback => {
                tracing::debug!(path = %raw, "No route matched, delegating to fallback");
                metrics::record_resolution("fallback", "default");
                self.fallback.respond(request)
            }
        }
    }
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::new(Greeting::default())
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("stages", &self.stages)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
