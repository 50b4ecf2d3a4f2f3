//! Prometheus metrics for the recipe search service.
//!
//! Covers HTTP traffic (via [`track_metrics`]), searches by match mode and
//! outcome, store query latency and error counts.
//!
//! # Example
//! ```no_run
//! use recipe_finder::metrics::SEARCHES_TOTAL;
//!
//! SEARCHES_TOTAL.with_label_values(&["all", "success"]).inc();
//! ```

mod middleware;

pub use middleware::track_metrics;

use lazy_static::lazy_static;
use prometheus::{CounterVec, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry};
use std::sync::OnceLock;

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Total number of HTTP requests received
    ///
    /// Labels: method, path, status_code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace("recipe_finder"),
        &["method", "path", "status_code"]
    ).expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// HTTP request duration in seconds
    ///
    /// Labels: method, path
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .namespace("recipe_finder")
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    /// Recipe searches handled
    ///
    /// Labels: mode (all/any), outcome (success/empty/error)
    pub static ref SEARCHES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("searches_total", "Total number of recipe searches")
            .namespace("recipe_finder"),
        &["mode", "outcome"]
    ).expect("Failed to create SEARCHES_TOTAL metric");

    /// Store query duration in seconds
    ///
    /// Labels: backend
    pub static ref STORE_QUERY_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "store_query_duration_seconds",
            "Recipe store query duration in seconds"
        )
        .namespace("recipe_finder")
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        &["backend"]
    ).expect("Failed to create STORE_QUERY_DURATION_SECONDS metric");

    /// Total number of errors
    ///
    /// Labels: component, error_type
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("errors_total", "Total number of errors")
            .namespace("recipe_finder"),
        &["component", "error_type"]
    ).expect("Failed to create ERRORS_TOTAL metric");

    /// Application build info
    ///
    /// Labels: version
    pub static ref BUILD_INFO: GaugeVec = GaugeVec::new(
        Opts::new("build_info", "Application build information")
            .namespace("recipe_finder"),
        &["version"]
    ).expect("Failed to create BUILD_INFO metric");
}

/// Register all metrics with the global registry.
///
/// Only the first call registers; every later call returns that first
/// outcome, including its error.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();
    init_once(&INIT, register_all)
}

fn init_once(
    cell: &OnceLock<Result<(), String>>,
    register: impl FnOnce() -> Result<(), prometheus::Error>,
) -> Result<(), prometheus::Error> {
    cell.get_or_init(|| register().map_err(|e| e.to_string()))
        .clone()
        .map_err(prometheus::Error::Msg)
}

fn register_all() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SEARCHES_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(STORE_QUERY_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(ERRORS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(BUILD_INFO.clone()))?;

    BUILD_INFO
        .with_label_values(&[env!("CARGO_PKG_VERSION")])
        .set(1.0);

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Generate Prometheus text format metrics
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization_is_idempotent() {
        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());
    }

    #[test]
    fn test_first_init_failure_is_remembered() {
        let cell = OnceLock::new();

        let first = init_once(&cell, || {
            Err(prometheus::Error::Msg("duplicate metric".to_string()))
        });
        assert!(first.is_err());

        let second = init_once(&cell, || Ok(()));
        match second {
            Err(prometheus::Error::Msg(msg)) => assert!(msg.contains("duplicate metric")),
            other => panic!("expected cached failure, got {other:?}"),
        }
    }

    #[test]
    fn test_search_counter() {
        SEARCHES_TOTAL.with_label_values(&["any", "success"]).inc();

        let value = SEARCHES_TOTAL.with_label_values(&["any", "success"]).get();
        assert!(value >= 1.0);
    }

    #[test]
    fn test_gather_metrics() {
        init_metrics().unwrap();

        let metrics = gather_metrics();
        assert!(metrics.contains("recipe_finder_build_info"));
    }
}
