//! Metrics collection and exposition.
//!
//! # Metrics
//! - `urlshort_requests_total` (counter): resolutions by outcome and source
//! - `urlshort_routes_loaded` (gauge): table size per composed stage
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one request resolution.
pub fn record_resolution(outcome: &'static str, source: &str) {
    metrics::counter!(
        "urlshort_requests_total",
        "outcome" => outcome,
        "source" => source.to_string()
    )
    .increment(1);
}

/// Publish the size of a freshly composed stage.
pub fn record_stage_loaded(source: &str, routes: usize) {
    metrics::gauge!("urlshort_routes_loaded", "source" => source.to_string()).set(routes as f64);
}
