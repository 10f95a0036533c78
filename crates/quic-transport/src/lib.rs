//! QUIC transport configuration.
//!
//! Builds the transport's feature toggles from named options, restricts the
//! negotiated QUIC versions, and hooks established connections into the
//! swarm's connection telemetry.
//!
//! # Usage
//!
//! ```rust,ignore
//! let transport = QuicTransport::new(
//!     &[disable_draft29(), with_metrics()],
//!     Some(ConnectionMetrics::new(registry)),
//! )?;
//! let endpoint_config = transport.endpoint_config();
//!
//! // after the handshake
//! let tracker = transport.on_handshake_complete(Direction::Inbound, QuicVersion::V1, elapsed);
//! ```

#![warn(clippy::pedantic)]

pub mod config;
pub mod errors;
pub mod transport;

pub use config::{
    disable_draft29, disable_reuseport, with_metrics, QuicVersion, TransportConfig,
    TransportOption,
};
pub use errors::{ConfigError, TransportError};
pub use transport::QuicTransport;
