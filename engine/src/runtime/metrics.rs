use std::sync::LazyLock;

use metrics::{Unit, counter, describe_counter, describe_histogram, histogram};

use crate::{enums::OutcomeStatus, model::outcome::ResolutionOutcome};

/// Global metrics registry for the application.
pub static METRICS: LazyLock<Metrics> = LazyLock::new(|| {
    describe_counter!(
        "resolutions_total",
        "Total number of finished resolutions by protocol, method and status",
    );

    describe_histogram!(
        "resolution_duration_ms",
        Unit::Milliseconds,
        "Wall-clock duration of finished resolutions",
    );

    Metrics
});

/// Application metrics facade (static methods for recording outcomes)
pub struct Metrics;

impl Metrics {
    /// Records a finished resolution with its status and duration.
    pub fn record_resolution(&self, protocol: &str, method: &str, outcome: &ResolutionOutcome) {
        let status = OutcomeStatus::from(outcome);

        counter!(
            "resolutions_total",
            "protocol" => protocol.to_owned(),
            "method" => method.to_owned(),
            "status" => status.to_string(),
        )
        .increment(1);

        #[allow(clippy::cast_precision_loss)]
        histogram!(
            "resolution_duration_ms",
            "protocol" => protocol.to_owned(),
            "method" => method.to_owned(),
        )
        .record(outcome.elapsed_ms() as f64);
    }
}
