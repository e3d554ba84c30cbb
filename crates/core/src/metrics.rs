//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Override resolution outcomes
//! - Metadata lookups against the external catalog

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Override Resolution Metrics
// =============================================================================

/// Override resolutions by outcome.
pub static OVERRIDE_RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "routarr_override_resolutions_total",
            "Total override resolutions",
        ),
        &["outcome"], // "matched", "unmatched", "not_configured", "failed"
    )
    .unwrap()
});

/// Rules weighed per resolution.
pub static RULES_EVALUATED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "routarr_override_rules_evaluated",
            "Number of override rules weighed per resolution",
        )
        .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
    )
    .unwrap()
});

// =============================================================================
// External Catalog Metrics
// =============================================================================

/// Metadata lookup duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "routarr_catalog_request_duration_seconds",
            "Duration of external catalog metadata lookups",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["media", "result"], // media: "tv" | "movie", result: "success" | "error"
    )
    .unwrap()
});

/// Record the outcome of one resolution.
pub fn record_resolution(outcome: &str) {
    OVERRIDE_RESOLUTIONS.with_label_values(&[outcome]).inc();
}

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(OVERRIDE_RESOLUTIONS.clone()),
        Box::new(RULES_EVALUATED.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
    }

    #[test]
    fn test_record_resolution_increments() {
        let before = OVERRIDE_RESOLUTIONS.with_label_values(&["matched"]).get();
        record_resolution("matched");
        let after = OVERRIDE_RESOLUTIONS.with_label_values(&["matched"]).get();
        assert!(after > before);
    }
}
