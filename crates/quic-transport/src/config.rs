//! QUIC transport configuration.
//!
//! A [`TransportConfig`] is built by applying named [`TransportOption`]s in
//! order. Each option sets one field and may reject the configuration; a
//! failing option leaves the configuration untouched.
//!
//! # Environment Variables
//!
//! | Variable | Option |
//! |----------|--------|
//! | `QUIC_DISABLE_REUSEPORT` | [`disable_reuseport`] |
//! | `QUIC_DISABLE_DRAFT29` | [`disable_draft29`] |
//! | `QUIC_METRICS_ENABLED` | [`with_metrics`] |

use crate::errors::ConfigError;
use common::config::parse_bool;
use common::types::ConnectionState;
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Option environment variable names.
pub const ENV_DISABLE_REUSEPORT: &str = "QUIC_DISABLE_REUSEPORT";
pub const ENV_DISABLE_DRAFT29: &str = "QUIC_DISABLE_DRAFT29";
pub const ENV_METRICS_ENABLED: &str = "QUIC_METRICS_ENABLED";

/// QUIC protocol versions the transport can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuicVersion {
    /// IETF draft-29, the legacy version.
    Draft29,
    /// RFC 9000.
    V1,
}

impl QuicVersion {
    /// Wire version number carried in long headers.
    #[must_use]
    pub const fn wire_version(&self) -> u32 {
        match self {
            QuicVersion::Draft29 => 0xff00_001d,
            QuicVersion::V1 => 0x0000_0001,
        }
    }

    /// Look up a version by its wire number.
    #[must_use]
    pub const fn from_wire(version: u32) -> Option<Self> {
        match version {
            0xff00_001d => Some(QuicVersion::Draft29),
            0x0000_0001 => Some(QuicVersion::V1),
            _ => None,
        }
    }

    /// Transport identifier reported in connection state.
    #[must_use]
    pub const fn transport_name(&self) -> &'static str {
        match self {
            QuicVersion::Draft29 => "quic",
            QuicVersion::V1 => "quic-v1",
        }
    }

    /// Connection state for an established connection of this version.
    ///
    /// QUIC secures and multiplexes inside its own handshake, so security
    /// and stream multiplexer are empty.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        ConnectionState::new(self.transport_name())
    }
}

type ApplyFn = dyn Fn(&mut TransportConfig) -> Result<(), ConfigError> + Send + Sync;

/// A named setter applied to a [`TransportConfig`].
#[derive(Clone)]
pub struct TransportOption {
    name: &'static str,
    apply: Arc<ApplyFn>,
}

impl TransportOption {
    /// Create an option from a setter.
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut TransportConfig) -> Result<(), ConfigError> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TransportOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportOption")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Disable `SO_REUSEPORT` on the listening socket.
#[must_use]
pub fn disable_reuseport() -> TransportOption {
    TransportOption::new("disable_reuseport", |config| {
        config.disable_reuseport = true;
        Ok(())
    })
}

/// Stop offering and accepting QUIC draft-29.
#[must_use]
pub fn disable_draft29() -> TransportOption {
    TransportOption::new("disable_draft29", |config| {
        config.disable_draft29 = true;
        Ok(())
    })
}

/// Enable connection telemetry.
#[must_use]
pub fn with_metrics() -> TransportOption {
    TransportOption::new("with_metrics", |config| {
        config.metrics_enabled = true;
        Ok(())
    })
}

/// Feature toggles for the QUIC transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransportConfig {
    pub disable_reuseport: bool,
    pub disable_draft29: bool,
    pub metrics_enabled: bool,
}

impl TransportConfig {
    /// Build a configuration from defaults and `options`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an option.
    pub fn from_options(options: &[TransportOption]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply(options)?;
        Ok(config)
    }

    /// Apply `options` in order.
    ///
    /// Either every option is applied or, on error, `self` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an option.
    pub fn apply(&mut self, options: &[TransportOption]) -> Result<(), ConfigError> {
        let mut staged = *self;
        for option in options {
            (option.apply)(&mut staged).inspect_err(|e| {
                debug!(
                    target: "quic.transport",
                    option = option.name,
                    error = %e,
                    "Transport option rejected configuration"
                );
            })?;
        }
        *self = staged;
        Ok(())
    }

    /// Load options from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a value that is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_options(&Self::options_from_vars(&env::vars().collect())?)
    }

    /// Translate environment variables into options (for testing).
    ///
    /// Unset and false values add no option.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a value that is not a boolean.
    pub fn options_from_vars(
        vars: &HashMap<String, String>,
    ) -> Result<Vec<TransportOption>, ConfigError> {
        let toggles: [(&str, fn() -> TransportOption); 3] = [
            (ENV_DISABLE_REUSEPORT, disable_reuseport),
            (ENV_DISABLE_DRAFT29, disable_draft29),
            (ENV_METRICS_ENABLED, with_metrics),
        ];

        let mut options = Vec::new();
        for (name, option) in toggles {
            let Some(value) = vars.get(name) else {
                continue;
            };
            let enabled = parse_bool(value).ok_or_else(|| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: value.clone(),
            })?;
            if enabled {
                options.push(option());
            }
        }
        Ok(options)
    }

    /// Whether the listening socket may use `SO_REUSEPORT`.
    #[must_use]
    pub fn reuseport_enabled(&self) -> bool {
        !self.disable_reuseport
    }

    /// Versions offered during negotiation, most preferred first.
    #[must_use]
    pub fn supported_versions(&self) -> Vec<QuicVersion> {
        let mut versions = vec![QuicVersion::V1];
        if !self.disable_draft29 {
            versions.push(QuicVersion::Draft29);
        }
        versions
    }

    /// Whether `version` may be negotiated.
    #[must_use]
    pub fn supports(&self, version: QuicVersion) -> bool {
        version != QuicVersion::Draft29 || !self.disable_draft29
    }

    /// Endpoint configuration restricted to [`Self::supported_versions`].
    #[must_use]
    pub fn endpoint_config(&self) -> quinn::EndpointConfig {
        let mut endpoint = quinn::EndpointConfig::default();
        endpoint.supported_versions(
            self.supported_versions()
                .iter()
                .map(QuicVersion::wire_version)
                .collect(),
        );
        endpoint
    }
}
