//! Prometheus metrics for written responses and request decoding.
//!
//! The macros are no-ops until a recorder is installed, so the library can
//! be used without one.

use std::time::Instant;

use axum::http::StatusCode;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Responses written, labelled by status code.
pub const METRIC_RESPONSES_WRITTEN: &str = "httputil_responses_written_total";
/// Requests whose body failed to decode.
pub const METRIC_DECODE_FAILURES: &str = "httputil_decode_failures_total";
/// Envelopes that failed to serialize and fell back to the literal body.
pub const METRIC_SERIALIZATION_FALLBACKS: &str = "httputil_serialization_fallbacks_total";
/// Time spent buffering and decoding a request body.
pub const METRIC_DECODE_LATENCY: &str = "httputil_decode_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup, after installing a recorder.
pub fn init_metrics() {
    describe_counter!(
        METRIC_RESPONSES_WRITTEN,
        "Total number of responses written, by status code"
    );
    describe_counter!(
        METRIC_DECODE_FAILURES,
        "Total number of request bodies that failed to decode"
    );
    describe_counter!(
        METRIC_SERIALIZATION_FALLBACKS,
        "Total number of envelopes replaced by the internal-error body"
    );
    describe_histogram!(
        METRIC_DECODE_LATENCY,
        "Request body read and decode latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Count a written response.
pub fn record_response(status: StatusCode) {
    counter!(METRIC_RESPONSES_WRITTEN, "status" => status.as_u16().to_string()).increment(1);
}

/// Increment decode failures counter.
pub fn inc_decode_failures() {
    counter!(METRIC_DECODE_FAILURES).increment(1);
}

/// Increment serialization fallbacks counter.
pub fn inc_serialization_fallbacks() {
    counter!(METRIC_SERIALIZATION_FALLBACKS).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for request decoding.
pub fn timer_decode() -> LatencyTimer {
    LatencyTimer::new(METRIC_DECODE_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = timer_decode();
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 9.0);
    }

    #[test]
    fn counters_reach_the_installed_recorder() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            init_metrics();
            record_response(StatusCode::BAD_REQUEST);
            inc_decode_failures();
            inc_decode_failures();
            inc_serialization_fallbacks();
        });

        let rendered = handle.render();
        assert!(rendered.contains("httputil_decode_failures_total 2"), "{rendered}");
        assert!(rendered.contains("httputil_serialization_fallbacks_total 1"), "{rendered}");
        assert!(
            rendered.contains(r#"httputil_responses_written_total{status="400"} 1"#),
            "{rendered}"
        );
    }
}
