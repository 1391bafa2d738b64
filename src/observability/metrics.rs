//! Client request metrics.
//!
//! # Metrics
//! - `api_client_requests_total` (counter): settled calls by method, status
//! - `api_client_request_duration_seconds` (histogram): call latency, retries included
//! - `api_client_retries_total` (counter): retries by method
//!
//! Recording goes through the `metrics` facade; nothing is exported unless
//! the application installs a recorder.

use std::time::Duration;

use metrics::{counter, histogram};

/// Record a settled call. `status` is the HTTP status, or the error kind
/// when no usable response settled the call.
pub fn record_request(method: &str, status: &str, duration: Duration) {
    counter!(
        "api_client_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "api_client_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_retry(method: &str) {
    counter!("api_client_retries_total", "method" => method.to_string()).increment(1);
}
