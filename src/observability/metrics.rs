//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (requests, latency, normalization outcomes)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `gateway_requests_total` (counter): total requests by method, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_normalization_total` (counter): decisions by outcome
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Recording without an installed exporter is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Where the normalization middleware sent a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationOutcome {
    /// Skipped by the framework scope check.
    Scope,
    /// Passed by a normalizer bypass rule.
    Bypass,
    /// Already carried a valid prefix.
    Pass,
    /// Redirected to a normalized path.
    Redirect,
}

impl NormalizationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationOutcome::Scope => "scope",
            NormalizationOutcome::Bypass => "bypass",
            NormalizationOutcome::Pass => "pass",
            NormalizationOutcome::Redirect => "redirect",
        }
    }
}

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_normalization(outcome: NormalizationOutcome) {
    metrics::counter!("gateway_normalization_total", "outcome" => outcome.as_str()).increment(1);
}
