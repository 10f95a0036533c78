//! Swarm connection telemetry.
//!
//! Records connection lifecycle events as tagged counters and
//! distributions through the `metrics` facade.
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = Arc::new(ViewRegistry::new()?);
//! let _handle = registry.init_metrics_recorder()?;
//! let metrics = ConnectionMetrics::new(registry);
//!
//! metrics.record_handshake_latency(handshake_elapsed, &state);
//! let tracker = ConnectionTracker::open(metrics.clone(), Direction::Outbound, state);
//! // ...
//! tracker.close();
//! ```

#![warn(clippy::pedantic)]

pub mod errors;
pub mod observability;

pub use errors::MetricsError;
pub use observability::{ConnectionMetrics, ConnectionTracker, ViewRegistry};
