//! Environment-based configuration.
//!
//! The bind address and the mock account id are the only configurable
//! surface; everything else the gateway serves is fixed by contract.

use thiserror::Error;

/// Default listen host.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port, matching the port client fixtures expect.
const DEFAULT_PORT: u16 = 5555;

/// Default mock account id.
const DEFAULT_ACCOUNT_ID: &str = "DU123456";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `GATEWAY_PORT` was set but not a valid port number.
    #[error("Invalid GATEWAY_PORT '{value}': {source}")]
    InvalidPort {
        /// The offending value.
        value: String,
        /// The underlying parse error.
        source: std::num::ParseIntError,
    },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Account id reported by the accounts endpoint.
    pub account_id: String,
}

impl GatewayConfig {
    /// Load configuration from process environment variables.
    ///
    /// Recognized variables: `GATEWAY_HOST`, `GATEWAY_PORT`,
    /// `GATEWAY_ACCOUNT_ID`. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an injected variable lookup.
    ///
    /// Keeps tests free of process-global environment mutation.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = lookup("GATEWAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("GATEWAY_PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let account_id =
            lookup("GATEWAY_ACCOUNT_ID").unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string());

        Ok(Self {
            host,
            port,
            account_id,
        })
    }

    /// The address to bind the listener to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
