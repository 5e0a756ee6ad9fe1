//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, cache outcome
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency
//! - `proxy_cache_lookups_total` (counter): lookups by outcome (hit/miss/expired)
//! - `proxy_cache_entries` (gauge): entries currently held
//! - `proxy_origin_errors_total` (counter): failed origin forwards
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed proxied request.
pub fn record_request(method: &str, status: u16, cache: &'static str, start: Instant) {
    counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "cache" => cache
    )
    .increment(1);
    histogram!("proxy_request_duration_seconds", "cache" => cache)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a cache lookup.
pub fn record_cache_lookup(outcome: &'static str) {
    counter!("proxy_cache_lookups_total", "outcome" => outcome).increment(1);
}

/// A put added a new key. Replacing an existing key does not count.
pub fn record_cache_inserted() {
    gauge!("proxy_cache_entries").increment(1.0);
}

pub fn record_cache_removed(entries: usize) {
    if entries > 0 {
        gauge!("proxy_cache_entries").decrement(entries as f64);
    }
}

pub fn record_origin_error() {
    counter!("proxy_origin_errors_total").increment(1);
}
