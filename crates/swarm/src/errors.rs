//! Swarm telemetry error types.
//!
//! These only surface at initialization time (registry construction and
//! recorder installation). Recording never returns an error to the
//! connection-handling path.

use thiserror::Error;

/// Swarm telemetry error type.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A bucket bound or view definition is invalid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The exporter rejected the view configuration or could not be installed.
    #[error("Metrics install error: {0}")]
    Install(String),
}

/// Result type alias using `MetricsError`.
pub type Result<T> = std::result::Result<T, MetricsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MetricsError::InvalidParameter("min must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: min must be positive");

        let err = MetricsError::Install("recorder already installed".to_string());
        assert_eq!(
            err.to_string(),
            "Metrics install error: recorder already installed"
        );
    }
}
