//! Connection lifecycle recorders.
//!
//! Called inline from connection-handling code at open, close and
//! handshake completion. Recording goes through the `metrics` facade to
//! whatever recorder is installed; with none installed it is a no-op.
//!
//! Recording never fails from the caller's point of view. Observations that
//! cannot be submitted are dropped with a `debug`/`trace` event.

use super::tags::{connection_tags, handshake_tags, TagSet};
use super::views::{Aggregation, Measure, ViewRegistry};
use common::types::{ConnectionState, Direction};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Handle for recording connection telemetry.
///
/// Cheap to clone; every clone shares the same immutable [`ViewRegistry`].
#[derive(Debug, Clone)]
pub struct ConnectionMetrics {
    registry: Arc<ViewRegistry>,
}

impl ConnectionMetrics {
    /// Create a recorder handle over `registry`.
    #[must_use]
    pub fn new(registry: Arc<ViewRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this handle records against.
    #[must_use]
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Record a connection being opened.
    ///
    /// Metric: `swarm/connections_opened`
    /// Labels: `direction`, `transport`, `security`, `muxer`
    pub fn record_connection_opened(&self, direction: Direction, state: &ConnectionState) {
        let tags = connection_tags(direction, state);
        self.record(Measure::ConnectionsOpened, &tags, 1);
    }

    /// Record a connection being closed.
    ///
    /// Metric: `swarm/connections_closed`
    /// Labels: `direction`, `transport`, `security`, `muxer`
    pub fn record_connection_closed(&self, direction: Direction, state: &ConnectionState) {
        let tags = connection_tags(direction, state);
        self.record(Measure::ConnectionsClosed, &tags, 1);
    }

    /// Record how long a connection was open.
    ///
    /// Metric: `swarm/connection_duration` (whole milliseconds)
    /// Labels: `direction`, `transport`, `security`, `muxer`
    pub fn record_connection_duration(
        &self,
        direction: Direction,
        elapsed: Duration,
        state: &ConnectionState,
    ) {
        let tags = connection_tags(direction, state);
        self.record_elapsed(Measure::ConnectionDuration, &tags, elapsed);
    }

    /// Record how long the connection handshake took.
    ///
    /// Metric: `swarm/handshake_latency` (whole milliseconds)
    /// Labels: `transport`, `security`, `muxer`
    pub fn record_handshake_latency(&self, elapsed: Duration, state: &ConnectionState) {
        let tags = handshake_tags(state);
        self.record_elapsed(Measure::HandshakeLatency, &tags, elapsed);
    }

    fn record_elapsed(&self, measure: Measure, tags: &TagSet<'_>, elapsed: Duration) {
        // Sub-millisecond durations truncate to 0
        match whole_millis(elapsed) {
            Some(ms) => self.record(measure, tags, ms),
            None => debug!(
                target: "swarm.metrics",
                metric = measure.name(),
                elapsed_secs = elapsed.as_secs(),
                "Dropping observation: duration exceeds u64 milliseconds"
            ),
        }
    }

    fn record(&self, measure: Measure, tags: &TagSet<'_>, value: u64) {
        let Some(view) = self.registry.view(measure) else {
            trace!(
                target: "swarm.metrics",
                metric = measure.name(),
                "Dropping observation: no view registered"
            );
            return;
        };

        let labels = tags.labels_for(view.tag_keys());
        match view.aggregation() {
            Aggregation::Sum => counter!(measure.name(), labels).increment(value),
            Aggregation::Distribution(_) => {
                // Millisecond durations stay well below 2^53
                #[allow(clippy::cast_precision_loss)]
                let value = value as f64;
                histogram!(measure.name(), labels).record(value);
            }
        }
    }
}

/// Convert `elapsed` to whole milliseconds, or `None` if it does not fit.
#[must_use]
pub fn whole_millis(elapsed: Duration) -> Option<u64> {
    u64::try_from(elapsed.as_millis()).ok()
}
