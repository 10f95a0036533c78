//! QUIC connection telemetry integration tests.
//!
//! Builds a `QuicTransport` from options (and from environment variables)
//! and checks what an established QUIC connection records.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::types::Direction;
use quic_transport::{with_metrics, QuicTransport, QuicVersion, TransportConfig};
use swarm::{ConnectionMetrics, ViewRegistry};
use swarm_test_utils::capture;

fn connection_metrics() -> ConnectionMetrics {
    ConnectionMetrics::new(Arc::new(ViewRegistry::new().unwrap()))
}

#[test]
fn test_inbound_quic_connection_records_two_labels() {
    let transport = QuicTransport::new(&[with_metrics()], Some(connection_metrics())).unwrap();

    let recorded = capture(|| {
        let tracker = transport
            .on_handshake_complete(Direction::Inbound, QuicVersion::Draft29, Duration::from_millis(7))
            .unwrap();
        tracker.close();
    });

    let labels = &[("direction", "inbound"), ("transport", "quic")];
    assert_eq!(recorded.counter("swarm/connections_opened", labels), Some(1));
    assert_eq!(recorded.counter("swarm/connections_closed", labels), Some(1));
    assert_eq!(
        recorded
            .histogram("swarm/connection_duration", labels)
            .map(|v| v.len()),
        Some(1)
    );
    assert_eq!(
        recorded.histogram("swarm/handshake_latency", &[("transport", "quic")]),
        Some(vec![7.0])
    );
}

#[test]
fn test_disabled_metrics_record_nothing() {
    let transport = QuicTransport::new(&[], Some(connection_metrics())).unwrap();

    let recorded = capture(|| {
        let tracker = transport.on_handshake_complete(
            Direction::Outbound,
            QuicVersion::V1,
            Duration::from_millis(3),
        );
        assert!(tracker.is_none());
    });

    assert!(recorded.series().is_empty());
}

#[test]
fn test_transport_from_env_style_vars() {
    let vars = HashMap::from([
        ("QUIC_METRICS_ENABLED".to_string(), "yes".to_string()),
        ("QUIC_DISABLE_DRAFT29".to_string(), "true".to_string()),
    ]);
    let options = TransportConfig::options_from_vars(&vars).unwrap();
    let transport = QuicTransport::new(&options, Some(connection_metrics())).unwrap();

    assert!(transport.metrics_enabled());
    assert_eq!(
        transport.config().supported_versions(),
        vec![QuicVersion::V1]
    );

    let recorded = capture(|| {
        drop(transport.on_handshake_complete(
            Direction::Outbound,
            QuicVersion::V1,
            Duration::from_millis(12),
        ));
    });

    assert_eq!(
        recorded.counter(
            "swarm/connections_opened",
            &[("direction", "outbound"), ("transport", "quic-v1")]
        ),
        Some(1)
    );
    assert_eq!(recorded.counter_total("swarm/connections_closed"), 1);
}
