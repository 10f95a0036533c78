//! QUIC transport error types.

use thiserror::Error;

/// Errors raised while building a [`crate::config::TransportConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A construction option rejected the configuration.
    #[error("Option '{option}' failed: {reason}")]
    OptionFailed {
        option: &'static str,
        reason: String,
    },

    /// An environment variable could not be parsed.
    #[error("Invalid value for {name}: '{value}' (expected true/false/1/0/yes/no)")]
    InvalidEnvVar { name: String, value: String },
}

/// Errors raised while constructing a [`crate::transport::QuicTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport configuration failed: {0}")]
    Config(#[from] ConfigError),
}
