//! Measure and view registry for connection telemetry.
//!
//! A view binds one measure to an aggregation and the tag keys it is broken
//! down by. The registry is built once at startup and handed to the
//! metrics engine; nothing in it changes afterwards.
//!
//! | Measure | Unit | Aggregation | Tag keys |
//! |---------|------|-------------|----------|
//! | `swarm/connections_opened` | count | sum | direction, transport, security, muxer |
//! | `swarm/connections_closed` | count | sum | direction, transport, security, muxer |
//! | `swarm/connection_duration` | ms | distribution (250ms..1w) | direction, transport, security, muxer |
//! | `swarm/handshake_latency` | ms | distribution (1ms..60s) | transport, security, muxer |

use super::buckets::{connection_duration_buckets, handshake_latency_buckets};
use super::tags::TagKey;
use crate::errors::{MetricsError, Result};
use metrics::Unit;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use tracing::debug;

/// Namespace prefix shared by every measure name.
pub const METRIC_NAMESPACE: &str = "swarm/";

/// Tag keys for connection open/close/duration views.
pub const CONNECTION_TAG_KEYS: &[TagKey] = &[
    TagKey::Direction,
    TagKey::Transport,
    TagKey::Security,
    TagKey::Muxer,
];

/// Tag keys for the handshake latency view.
pub const HANDSHAKE_TAG_KEYS: &[TagKey] = &[TagKey::Transport, TagKey::Security, TagKey::Muxer];

/// A named quantity observed by the swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    ConnectionsOpened,
    ConnectionsClosed,
    ConnectionDuration,
    HandshakeLatency,
}

impl Measure {
    /// Every measure, in registration order.
    pub const ALL: [Measure; 4] = [
        Measure::ConnectionsOpened,
        Measure::ConnectionsClosed,
        Measure::ConnectionDuration,
        Measure::HandshakeLatency,
    ];

    /// Full metric name, including [`METRIC_NAMESPACE`].
    ///
    /// These are stable identifiers for dashboards and alerts.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Measure::ConnectionsOpened => "swarm/connections_opened",
            Measure::ConnectionsClosed => "swarm/connections_closed",
            Measure::ConnectionDuration => "swarm/connection_duration",
            Measure::HandshakeLatency => "swarm/handshake_latency",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Measure::ConnectionsOpened => "Connections Opened",
            Measure::ConnectionsClosed => "Connections Closed",
            Measure::ConnectionDuration => "Duration of a Connection",
            Measure::HandshakeLatency => "Duration of the handshake",
        }
    }

    #[must_use]
    pub const fn unit(&self) -> Unit {
        match self {
            Measure::ConnectionsOpened | Measure::ConnectionsClosed => Unit::Count,
            Measure::ConnectionDuration | Measure::HandshakeLatency => Unit::Milliseconds,
        }
    }
}

/// How observations of a measure are aggregated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Running total of observed values.
    Sum,
    /// Histogram over explicit, strictly increasing bucket boundaries.
    Distribution(Vec<f64>),
}

/// Binding of a measure to an aggregation and its tag keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    measure: Measure,
    aggregation: Aggregation,
    tag_keys: Vec<TagKey>,
}

impl View {
    /// Create a view.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidParameter` if `tag_keys` is empty or
    /// repeats a key, or if distribution boundaries are empty or not
    /// strictly increasing.
    pub fn new(measure: Measure, aggregation: Aggregation, tag_keys: &[TagKey]) -> Result<Self> {
        if tag_keys.is_empty() {
            return Err(MetricsError::InvalidParameter(format!(
                "view for {} must declare at least one tag key",
                measure.name()
            )));
        }
        for (i, key) in tag_keys.iter().enumerate() {
            if tag_keys.iter().skip(i + 1).any(|other| other == key) {
                return Err(MetricsError::InvalidParameter(format!(
                    "view for {} declares tag key '{key}' twice",
                    measure.name()
                )));
            }
        }
        if let Aggregation::Distribution(bounds) = &aggregation {
            if bounds.is_empty() {
                return Err(MetricsError::InvalidParameter(format!(
                    "distribution for {} has no bucket boundaries",
                    measure.name()
                )));
            }
            if !bounds.windows(2).all(|w| matches!(w, [a, b] if a < b)) {
                return Err(MetricsError::InvalidParameter(format!(
                    "distribution for {} must have strictly increasing boundaries",
                    measure.name()
                )));
            }
        }

        Ok(Self {
            measure,
            aggregation,
            tag_keys: tag_keys.to_vec(),
        })
    }

    #[must_use]
    pub fn measure(&self) -> Measure {
        self.measure
    }

    #[must_use]
    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    #[must_use]
    pub fn tag_keys(&self) -> &[TagKey] {
        &self.tag_keys
    }
}

/// The set of views installed into the metrics engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRegistry {
    views: Vec<View>,
}

impl ViewRegistry {
    /// Build the four default connection views.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidParameter` if bucket generation fails.
    pub fn new() -> Result<Self> {
        Self::with_views(vec![
            View::new(Measure::ConnectionsOpened, Aggregation::Sum, CONNECTION_TAG_KEYS)?,
            View::new(Measure::ConnectionsClosed, Aggregation::Sum, CONNECTION_TAG_KEYS)?,
            View::new(
                Measure::ConnectionDuration,
                Aggregation::Distribution(connection_duration_buckets()?),
                CONNECTION_TAG_KEYS,
            )?,
            View::new(
                Measure::HandshakeLatency,
                Aggregation::Distribution(handshake_latency_buckets()?),
                HANDSHAKE_TAG_KEYS,
            )?,
        ])
    }

    /// Build a registry from custom views.
    ///
    /// Measures without a view are not recorded.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidParameter` if a measure has more than
    /// one view.
    pub fn with_views(views: Vec<View>) -> Result<Self> {
        for (i, view) in views.iter().enumerate() {
            if views.iter().skip(i + 1).any(|v| v.measure == view.measure) {
                return Err(MetricsError::InvalidParameter(format!(
                    "measure {} registered more than once",
                    view.measure.name()
                )));
            }
        }
        Ok(Self { views })
    }

    /// All registered views.
    #[must_use]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// The view for `measure`, if registered.
    #[must_use]
    pub fn view(&self, measure: Measure) -> Option<&View> {
        self.views.iter().find(|v| v.measure == measure)
    }

    /// Bind each distribution view's boundaries to its metric name.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Install` if the exporter rejects a bucket list.
    pub fn install(&self, builder: PrometheusBuilder) -> Result<PrometheusBuilder> {
        self.views.iter().try_fold(builder, |builder, view| match &view.aggregation {
            Aggregation::Sum => Ok(builder),
            Aggregation::Distribution(bounds) => builder
                .set_buckets_for_metric(Matcher::Full(view.measure.name().to_string()), bounds)
                .map_err(|e| {
                    MetricsError::Install(format!(
                        "Failed to set buckets for {}: {e}",
                        view.measure.name()
                    ))
                }),
        })
    }

    /// Register unit and description of every view's measure with the
    /// current recorder.
    pub fn describe(&self) {
        for view in &self.views {
            let measure = view.measure;
            match view.aggregation {
                Aggregation::Sum => {
                    metrics::describe_counter!(measure.name(), measure.unit(), measure.description());
                }
                Aggregation::Distribution(_) => {
                    metrics::describe_histogram!(
                        measure.name(),
                        measure.unit(),
                        measure.description()
                    );
                }
            }
        }
    }

    /// Install a Prometheus recorder configured with these views and
    /// return the handle for rendering.
    ///
    /// Must be called before any connection activity is recorded.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Install` if bucket configuration fails or a
    /// global recorder is already installed.
    pub fn init_metrics_recorder(&self) -> Result<PrometheusHandle> {
        let handle = self
            .install(PrometheusBuilder::new())?
            .install_recorder()
            .map_err(|e| MetricsError::Install(format!("Failed to install Prometheus recorder: {e}")))?;

        self.describe();
        debug!(
            target: "swarm.metrics",
            views = self.views.len(),
            "Installed connection metric views"
        );
        Ok(handle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_names_use_namespace() {
        for measure in Measure::ALL {
            assert!(measure.name().starts_with(METRIC_NAMESPACE));
        }
        assert_eq!(Measure::ConnectionsOpened.name(), "swarm/connections_opened");
        assert_eq!(Measure::ConnectionsClosed.name(), "swarm/connections_closed");
        assert_eq!(Measure::ConnectionDuration.name(), "swarm/connection_duration");
        assert_eq!(Measure::HandshakeLatency.name(), "swarm/handshake_latency");
    }

    #[test]
    fn test_measure_units() {
        assert_eq!(Measure::ConnectionsOpened.unit(), Unit::Count);
        assert_eq!(Measure::ConnectionsClosed.unit(), Unit::Count);
        assert_eq!(Measure::ConnectionDuration.unit(), Unit::Milliseconds);
        assert_eq!(Measure::HandshakeLatency.unit(), Unit::Milliseconds);
    }

    #[test]
    fn test_default_registry_has_four_views() {
        let registry = ViewRegistry::new().unwrap();

        assert_eq!(registry.views().len(), 4);
        for measure in Measure::ALL {
            assert!(registry.view(measure).is_some(), "missing view for {measure:?}");
        }
    }

    #[test]
    fn test_default_view_bindings() {
        let registry = ViewRegistry::new().unwrap();

        let opened = registry.view(Measure::ConnectionsOpened).unwrap();
        assert_eq!(opened.aggregation(), &Aggregation::Sum);
        assert_eq!(opened.tag_keys(), CONNECTION_TAG_KEYS);

        let closed = registry.view(Measure::ConnectionsClosed).unwrap();
        assert_eq!(closed.aggregation(), &Aggregation::Sum);
        assert_eq!(closed.tag_keys(), CONNECTION_TAG_KEYS);

        let duration = registry.view(Measure::ConnectionDuration).unwrap();
        assert!(
            matches!(duration.aggregation(), Aggregation::Distribution(b) if b.len() == 23 && b[0] == 250.0)
        );
        assert_eq!(duration.tag_keys(), CONNECTION_TAG_KEYS);

        let handshake = registry.view(Measure::HandshakeLatency).unwrap();
        assert!(
            matches!(handshake.aggregation(), Aggregation::Distribution(b) if b.len() == 17 && b[0] == 1.0)
        );
        assert_eq!(handshake.tag_keys(), HANDSHAKE_TAG_KEYS);
        assert!(!handshake.tag_keys().contains(&TagKey::Direction));
    }

    #[test]
    fn test_view_rejects_empty_tag_keys() {
        let result = View::new(Measure::ConnectionsOpened, Aggregation::Sum, &[]);
        assert!(matches!(result, Err(MetricsError::InvalidParameter(_))));
    }

    #[test]
    fn test_view_rejects_duplicate_tag_keys() {
        let result = View::new(
            Measure::ConnectionsOpened,
            Aggregation::Sum,
            &[TagKey::Transport, TagKey::Transport],
        );
        assert!(
            matches!(result, Err(MetricsError::InvalidParameter(msg)) if msg.contains("twice"))
        );
    }

    #[test]
    fn test_view_rejects_bad_boundaries() {
        let empty = View::new(
            Measure::HandshakeLatency,
            Aggregation::Distribution(vec![]),
            HANDSHAKE_TAG_KEYS,
        );
        assert!(matches!(empty, Err(MetricsError::InvalidParameter(_))));

        let unordered = View::new(
            Measure::HandshakeLatency,
            Aggregation::Distribution(vec![1.0, 4.0, 2.0]),
            HANDSHAKE_TAG_KEYS,
        );
        assert!(
            matches!(unordered, Err(MetricsError::InvalidParameter(msg)) if msg.contains("strictly increasing"))
        );
    }

    #[test]
    fn test_registry_rejects_duplicate_measure() {
        let view = View::new(Measure::ConnectionsOpened, Aggregation::Sum, CONNECTION_TAG_KEYS).unwrap();
        let result = ViewRegistry::with_views(vec![view.clone(), view]);
        assert!(
            matches!(result, Err(MetricsError::InvalidParameter(msg)) if msg.contains("more than once"))
        );
    }

    #[test]
    fn test_partial_registry_lookup() {
        let view = View::new(Measure::ConnectionsOpened, Aggregation::Sum, CONNECTION_TAG_KEYS).unwrap();
        let registry = ViewRegistry::with_views(vec![view]).unwrap();

        assert!(registry.view(Measure::ConnectionsOpened).is_some());
        assert!(registry.view(Measure::HandshakeLatency).is_none());
    }

    #[test]
    fn test_install_accepts_default_views() {
        let registry = ViewRegistry::new().unwrap();
        assert!(registry.install(PrometheusBuilder::new()).is_ok());
    }

    #[test]
    fn test_registry_serializes_view_list() {
        let registry = ViewRegistry::new().unwrap();
        let json = serde_json::to_value(&registry).unwrap();

        let views = json["views"].as_array().unwrap();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0]["measure"], "connections_opened");
        assert_eq!(views[0]["aggregation"], "sum");
        assert_eq!(views[3]["measure"], "handshake_latency");
        assert_eq!(
            views[3]["tag_keys"],
            serde_json::json!(["transport", "security", "muxer"])
        );
        assert_eq!(views[3]["aggregation"]["distribution"][0], 1.0);
    }
}
