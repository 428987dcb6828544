//! Prometheus-style Metrics Module
//!
//! Counts invariant runs and violations per route and records how long each
//! check took. The auditor is a one-shot process, so the recorder is rendered
//! to text after a run instead of being served over HTTP.

use citrate_supply::InvariantReport;
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// Global Prometheus handle
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

// ============================================================================
// Metric Names
// ============================================================================

pub const METRIC_INVARIANT_CHECKS_TOTAL: &str = "citrate_invariant_checks_total";
pub const METRIC_INVARIANT_VIOLATIONS_TOTAL: &str = "citrate_invariant_violations_total";
pub const METRIC_INVARIANT_ERRORS_TOTAL: &str = "citrate_invariant_errors_total";
pub const METRIC_INVARIANT_LATENCY: &str = "citrate_invariant_check_seconds";

// ============================================================================
// Initialization
// ============================================================================

/// Install the Prometheus recorder. Must be called before any checks run.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Metrics already initialized"))?;

    register_metric_descriptions();
    tracing::debug!("Prometheus recorder installed");

    Ok(())
}

fn register_metric_descriptions() {
    describe_counter!(
        METRIC_INVARIANT_CHECKS_TOTAL,
        "Total invariant evaluations by route"
    );
    describe_counter!(
        METRIC_INVARIANT_VIOLATIONS_TOTAL,
        "Invariant evaluations that found broken supply accounting"
    );
    describe_counter!(
        METRIC_INVARIANT_ERRORS_TOTAL,
        "Invariant evaluations aborted by an unavailable reading"
    );
    describe_histogram!(
        METRIC_INVARIANT_LATENCY,
        Unit::Seconds,
        "Time spent evaluating a single invariant"
    );
}

/// Render the current metrics in Prometheus text format
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Recording
// ============================================================================

/// Record the outcome of one invariant evaluation
pub fn record_report(report: &InvariantReport) {
    let labels = [("route", report.key.clone())];
    counter!(METRIC_INVARIANT_CHECKS_TOTAL, 1, &labels);
    histogram!(METRIC_INVARIANT_LATENCY, report.elapsed.as_secs_f64(), &labels);

    match &report.outcome {
        Ok(()) => {}
        Err(e) if e.is_violation() => {
            counter!(METRIC_INVARIANT_VIOLATIONS_TOTAL, 1, &labels);
        }
        Err(_) => {
            counter!(METRIC_INVARIANT_ERRORS_TOTAL, 1, &labels);
        }
    }
}
