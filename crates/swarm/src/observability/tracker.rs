//! Per-connection lifecycle tracking.
//!
//! A [`ConnectionTracker`] is created when a connection is established and
//! records the close (count and duration) exactly once, either on an
//! explicit [`ConnectionTracker::close`] or when dropped.

use super::metrics::ConnectionMetrics;
use common::types::{ConnectionState, Direction};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Records open/close telemetry for one connection.
#[derive(Debug)]
pub struct ConnectionTracker {
    metrics: ConnectionMetrics,
    direction: Direction,
    state: ConnectionState,
    opened_at: Instant,
    closed: AtomicBool,
}

impl ConnectionTracker {
    /// Start tracking a connection and record it as opened.
    #[must_use]
    pub fn open(metrics: ConnectionMetrics, direction: Direction, state: ConnectionState) -> Self {
        metrics.record_connection_opened(direction, &state);
        debug!(
            target: "swarm.connection",
            direction = direction.as_str(),
            transport = %state.transport,
            "Connection opened"
        );
        Self {
            metrics,
            direction,
            state,
            opened_at: Instant::now(),
            closed: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Time since the connection was opened.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.opened_at.elapsed()
    }

    /// Whether the close has already been recorded.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Record the connection as closed. Returns the recorded duration.
    pub fn close(self) -> Duration {
        let elapsed = self.elapsed();
        self.record_close(elapsed);
        elapsed
    }

    fn record_close(&self, elapsed: Duration) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.metrics
            .record_connection_closed(self.direction, &self.state);
        self.metrics
            .record_connection_duration(self.direction, elapsed, &self.state);
        debug!(
            target: "swarm.connection",
            direction = self.direction.as_str(),
            transport = %self.state.transport,
            duration_ms = elapsed.as_millis(),
            "Connection closed"
        );
    }
}

impl Drop for ConnectionTracker {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        self.record_close(elapsed);
    }
}
