//! Connection types shared between transports and the swarm.
//!
//! These are reported by transport implementations once a connection is
//! established and consumed by the swarm's telemetry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side initiated a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The remote peer dialed us.
    Inbound,
    /// We dialed the remote peer.
    Outbound,
    /// Direction was not reported.
    #[default]
    Unknown,
}

impl Direction {
    /// Returns the direction as a string for metric labels.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
            Direction::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the protocols negotiated for an established connection.
///
/// An empty string means the layer does not apply. QUIC, for example,
/// secures and multiplexes inside the transport handshake and leaves both
/// `security` and `stream_multiplexer` empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionState {
    /// Transport protocol identifier (e.g., "tcp", "quic-v1").
    pub transport: String,
    /// Security protocol identifier (e.g., "tls", "noise").
    pub security: String,
    /// Stream multiplexer identifier (e.g., "yamux", "mplex").
    pub stream_multiplexer: String,
}

impl ConnectionState {
    /// Create a state for the given transport with no security or muxer.
    #[must_use]
    pub fn new(transport: impl Into<String>) -> Self {
        Self {
            transport: transport.into(),
            ..Self::default()
        }
    }

    /// Set the security protocol.
    #[must_use]
    pub fn with_security(mut self, security: impl Into<String>) -> Self {
        self.security = security.into();
        self
    }

    /// Set the stream multiplexer.
    #[must_use]
    pub fn with_stream_multiplexer(mut self, muxer: impl Into<String>) -> Self {
        self.stream_multiplexer = muxer.into();
        self
    }
}
