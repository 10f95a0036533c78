//! Tracing subscriber setup shared by binaries and test harnesses.

use crate::config::ObservabilityConfig;
use crate::error::{CommonError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level` when set.
///
/// # Errors
///
/// Returns `CommonError::Observability` if the filter directive is invalid
/// or a global subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            CommonError::Observability(format!(
                "Invalid log filter '{}': {e}",
                config.log_level
            ))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| CommonError::Observability(format!("Failed to install subscriber: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_only_once() {
        let config = ObservabilityConfig::default();

        // Another test may have installed it first; the second call must fail either way.
        let _ = init_tracing(&config);
        let second = init_tracing(&config);

        assert!(matches!(second, Err(CommonError::Observability(_))));
    }
}
