//! Connection telemetry for the swarm.
//!
//! Observes connection establishment, teardown, duration and handshake
//! latency, broken down by direction and negotiated protocols.
//!
//! # Metrics
//!
//! | Metric | Type | Labels | Purpose |
//! |--------|------|--------|---------|
//! | `swarm/connections_opened` | Counter | `direction`, `transport`, `security`, `muxer` | Connections established |
//! | `swarm/connections_closed` | Counter | `direction`, `transport`, `security`, `muxer` | Connections torn down |
//! | `swarm/connection_duration` | Histogram (ms) | `direction`, `transport`, `security`, `muxer` | Connection lifetime |
//! | `swarm/handshake_latency` | Histogram (ms) | `transport`, `security`, `muxer` | Handshake time |
//!
//! `security` and `muxer` are omitted for transports that do not negotiate
//! them separately (QUIC).

pub mod buckets;
pub mod metrics;
pub mod tags;
pub mod tracker;
pub mod views;

// Re-exports for convenience
pub use buckets::{connection_duration_buckets, exponential_buckets, handshake_latency_buckets};
pub use self::metrics::ConnectionMetrics;
pub use tags::{connection_tags, handshake_tags, TagKey, TagSet};
pub use tracker::ConnectionTracker;
pub use views::{Aggregation, Measure, View, ViewRegistry, METRIC_NAMESPACE};
