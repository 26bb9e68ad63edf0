//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mueller_requests_total` (counter): requests by method and status
//! - `mueller_routes_registered_total` (counter): routes by curated flag
//! - `mueller_active_connections` (gauge): connections being handled
//! - `mueller_sound_failures_total` (counter): cues the sound board could not play
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op, so tests need no setup
//! - Prometheus exporter is opt-in via configuration

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, address = %addr, "Failed to install metrics exporter"),
    }
}

/// Count one answered request.
pub fn record_request(method: &str, status: u16) {
    metrics::counter!(
        "mueller_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Count one successfully registered route.
pub fn record_route_registered(curated: bool) {
    metrics::counter!(
        "mueller_routes_registered_total",
        "curated" => if curated { "true" } else { "false" }
    )
    .increment(1);
}

/// Publish the number of connections currently being handled.
pub fn set_active_connections(count: u64) {
    metrics::gauge!("mueller_active_connections").set(count as f64);
}

/// Count one sound cue that could not be played.
pub fn record_sound_failure() {
    metrics::counter!("mueller_sound_failures_total").increment(1);
}
