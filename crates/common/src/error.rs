//! Common error types for swarm components.

use thiserror::Error;

/// Common errors that can occur across swarm components
#[derive(Error, Debug)]
pub enum CommonError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging or tracing setup failed
    #[error("Observability error: {0}")]
    Observability(String),
}

/// Result type alias using `CommonError`
pub type Result<T> = std::result::Result<T, CommonError>;
