//! Prometheus metrics for evaluation and store activity.
//!
//! This module provides metrics for:
//! - Snapshot evaluation latency
//! - Leg outcomes and coupon statuses produced by reads
//! - Store mutations and rejected writes

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::resolution::Outcome;

// === Metric Name Constants ===

/// Snapshot evaluation latency metric name.
pub const METRIC_EVALUATION_LATENCY: &str = "coupon_evaluation_latency_ms";
/// Resolved legs counter metric name.
pub const METRIC_LEGS_RESOLVED: &str = "legs_resolved_total";
/// Evaluated coupons counter metric name.
pub const METRIC_COUPONS_EVALUATED: &str = "coupons_evaluated_total";
/// Store mutations counter metric name.
pub const METRIC_STORE_MUTATIONS: &str = "store_mutations_total";
/// Rejected store writes counter metric name.
pub const METRIC_STORE_REJECTIONS: &str = "store_rejections_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_EVALUATION_LATENCY,
        "Time to evaluate coupons against a snapshot in milliseconds"
    );

    describe_counter!(METRIC_LEGS_RESOLVED, "Legs resolved, by outcome");
    describe_counter!(METRIC_COUPONS_EVALUATED, "Coupons evaluated, by status");
    describe_counter!(METRIC_STORE_MUTATIONS, "Successful store writes, by operation");
    describe_counter!(METRIC_STORE_REJECTIONS, "Rejected store writes, by reason");

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Count a resolved leg.
pub fn record_leg_outcome(outcome: Outcome) {
    counter!(METRIC_LEGS_RESOLVED, "outcome" => outcome.to_string()).increment(1);
}

/// Count an evaluated coupon.
pub fn record_coupon_status(status: Outcome) {
    counter!(METRIC_COUPONS_EVALUATED, "status" => status.to_string()).increment(1);
}

/// Count a successful store write.
pub fn inc_store_mutation(operation: &'static str) {
    counter!(METRIC_STORE_MUTATIONS, "operation" => operation).increment(1);
}

/// Count a rejected store write.
pub fn inc_store_rejection(reason: &'static str) {
    counter!(METRIC_STORE_REJECTIONS, "reason" => reason).increment(1);
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

/// Create a latency timer for snapshot evaluation.
pub fn timer_evaluation() -> LatencyTimer {
    LatencyTimer::new(METRIC_EVALUATION_LATENCY)
}
