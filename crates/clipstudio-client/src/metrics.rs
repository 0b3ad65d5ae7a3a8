//! API client metrics collection.
//!
//! Provides standardized metrics for monitoring backend traffic:
//! - Request counters by operation and status
//! - Latency histograms
//! - Health probe outcomes
//! - Mock fallbacks, so "demo mode" is distinguishable from real traffic

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total API requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "clipstudio_api_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "clipstudio_api_latency_seconds";

    /// Health probes by result.
    pub const HEALTH_PROBES_TOTAL: &str = "clipstudio_health_probes_total";

    /// Errors swallowed and replaced with mock payloads.
    pub const MOCK_FALLBACKS_TOTAL: &str = "clipstudio_mock_fallbacks_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record metrics for a completed request. `status` is the HTTP status, or a
/// cause label when no response arrived.
pub fn record_request(operation: &str, status: &str, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

/// Record a health probe outcome.
pub fn record_probe(reachable: bool) {
    let result = if reachable { "reachable" } else { "unreachable" };
    counter!(names::HEALTH_PROBES_TOTAL, "result" => result).increment(1);
}

/// Record a swallowed error replaced by mock data.
pub fn record_fallback(domain: &str, operation: &str, cause: &str) {
    counter!(
        names::MOCK_FALLBACKS_TOTAL,
        "domain" => domain.to_string(),
        "operation" => operation.to_string(),
        "cause" => cause.to_string()
    )
    .increment(1);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::REQUESTS_TOTAL.contains("requests"));
        assert!(names::LATENCY_SECONDS.contains("latency"));
        assert!(names::MOCK_FALLBACKS_TOTAL.contains("fallbacks"));
    }
}
