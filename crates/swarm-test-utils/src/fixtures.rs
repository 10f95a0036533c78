//! Connection state fixtures for telemetry tests.
//!
//! Each function returns the `ConnectionState` a transport of that kind
//! would report once the connection is established.

use common::types::ConnectionState;

/// TCP secured with TLS, multiplexed with yamux.
#[must_use]
pub fn tcp_tls_yamux() -> ConnectionState {
    ConnectionState::new("tcp")
        .with_security("tls")
        .with_stream_multiplexer("yamux")
}

/// TCP secured with Noise, multiplexed with mplex.
#[must_use]
pub fn tcp_noise_mplex() -> ConnectionState {
    ConnectionState::new("tcp")
        .with_security("noise")
        .with_stream_multiplexer("mplex")
}

/// WebSocket secured with Noise, multiplexed with yamux.
#[must_use]
pub fn websocket_noise_yamux() -> ConnectionState {
    ConnectionState::new("websocket")
        .with_security("noise")
        .with_stream_multiplexer("yamux")
}

/// QUIC with the given transport name (e.g., "quic", "quic-v1").
///
/// Security and multiplexing are part of the QUIC handshake, so both are
/// left empty.
#[must_use]
pub fn quic(transport: &str) -> ConnectionState {
    ConnectionState::new(transport)
}

/// A transport that failed to report its name.
#[must_use]
pub fn unreported_transport() -> ConnectionState {
    ConnectionState::default()
        .with_security("tls")
        .with_stream_multiplexer("yamux")
}

/// Test connection state builder with a distinct transport name per index.
///
/// Used to give concurrent recordings distinct tag sets.
#[must_use]
pub fn numbered_transport(prefix: &str, index: usize) -> ConnectionState {
    ConnectionState::new(format!("{prefix}-{index}"))
        .with_security("tls")
        .with_stream_multiplexer("yamux")
}
