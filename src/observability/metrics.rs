//! Metrics collection and exposition.
//!
//! # Metrics
//! - `static_requests_total` (counter): requests by method, status
//! - `static_request_duration_seconds` (histogram): latency distribution
//! - `static_config_reloads_total` (counter): reloads by trigger, outcome
//! - `static_config_hosts` (gauge): hosts in the live config
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::ReloadTrigger;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "static_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("static_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_reload(trigger: ReloadTrigger, success: bool) {
    metrics::counter!(
        "static_config_reloads_total",
        "trigger" => trigger.as_str(),
        "outcome" => if success { "success" } else { "failure" }
    )
    .increment(1);
}

pub fn record_hosts(count: usize) {
    metrics::gauge!("static_config_hosts").set(count as f64);
}
