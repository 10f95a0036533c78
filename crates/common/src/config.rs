//! Common configuration types for swarm components.

use crate::error::{CommonError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

/// Default log level when `LOG_LEVEL` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub log_level: String,
    /// Enable JSON-formatted logs
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let log_level = vars
            .get("LOG_LEVEL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        if log_level.trim().is_empty() {
            return Err(CommonError::Configuration(
                "LOG_LEVEL must not be empty".to_string(),
            ));
        }

        let json_logs = match vars.get("LOG_JSON") {
            Some(value) => parse_bool(value).ok_or_else(|| {
                CommonError::Configuration(format!(
                    "LOG_JSON must be a boolean (true/false/1/0/yes/no), got '{}'",
                    value
                ))
            })?,
            None => false,
        };

        Ok(Self {
            log_level,
            json_logs,
        })
    }
}

/// Parse a boolean flag as accepted in environment variables.
///
/// Accepts `true/false`, `1/0` and `yes/no`, case-insensitively.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
