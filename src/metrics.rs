use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and register the application counters.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Only one global recorder can exist per process; later calls (tests building
/// several apps) get a detached handle instead of panicking.
pub fn init_metrics() -> PrometheusHandle {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::debug!("Metrics recorder already installed");
        return handle;
    }

    // Pre-register counters so they appear even before the first increment.
    counter!("predictions_submitted_total").absolute(0);
    counter!("fixture_outcomes_set_total").absolute(0);
    counter!("awards_created_total").absolute(0);
    counter!("awards_already_scored_total").absolute(0);
    counter!("scoring_fixture_failures_total").absolute(0);

    handle
}
