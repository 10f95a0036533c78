//! QUIC transport construction and connection telemetry hooks.

use crate::config::{QuicVersion, TransportConfig, TransportOption};
use crate::errors::TransportError;
use common::types::Direction;
use std::time::Duration;
use swarm::{ConnectionMetrics, ConnectionTracker};
use tracing::{info, warn};

/// A configured QUIC transport.
#[derive(Debug, Clone)]
pub struct QuicTransport {
    config: TransportConfig,
    metrics: Option<ConnectionMetrics>,
}

impl QuicTransport {
    /// Build a transport from `options`.
    ///
    /// `metrics` is kept only when [`crate::config::with_metrics`] is among
    /// the options.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Config` if any option fails. No transport is
    /// built from a partially applied configuration.
    pub fn new(
        options: &[TransportOption],
        metrics: Option<ConnectionMetrics>,
    ) -> Result<Self, TransportError> {
        let config = TransportConfig::from_options(options)?;

        let metrics = if config.metrics_enabled {
            if metrics.is_none() {
                warn!(
                    target: "quic.transport",
                    "Metrics enabled but no recorder handle supplied; connections will not be recorded"
                );
            }
            metrics
        } else {
            None
        };

        info!(
            target: "quic.transport",
            reuseport = config.reuseport_enabled(),
            draft29 = !config.disable_draft29,
            metrics = metrics.is_some(),
            "QUIC transport configured"
        );

        Ok(Self { config, metrics })
    }

    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Whether connections on this transport are recorded.
    #[must_use]
    pub fn metrics_enabled(&self) -> bool {
        self.metrics.is_some()
    }

    /// Endpoint configuration for the versions this transport negotiates.
    #[must_use]
    pub fn endpoint_config(&self) -> quinn::EndpointConfig {
        self.config.endpoint_config()
    }

    /// Called once a QUIC handshake completes.
    ///
    /// Records handshake latency and the connection opening. The returned
    /// tracker records the close when the connection ends; it is `None` when
    /// metrics are disabled.
    #[must_use]
    pub fn on_handshake_complete(
        &self,
        direction: Direction,
        version: QuicVersion,
        handshake_elapsed: Duration,
    ) -> Option<ConnectionTracker> {
        let metrics = self.metrics.as_ref()?;
        let state = version.connection_state();
        metrics.record_handshake_latency(handshake_elapsed, &state);
        Some(ConnectionTracker::open(metrics.clone(), direction, state))
    }
}
