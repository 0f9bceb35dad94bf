//! Deployment configuration

use thiserror::Error;

/// A required configuration value was absent
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The named environment variable is not set
    #[error("missing configuration: {0}")]
    Missing(&'static str),
}

/// Per-deployment settings for the authorizer
#[derive(Clone, Debug)]
pub struct Config {
    /// The well-known URL the trusted authority publishes its key set at
    ///
    /// Fixed per deployment environment; never derived from the request.
    pub jwks_url: String,
}

impl Config {
    /// Reads the configuration from the environment
    ///
    /// # Errors
    ///
    /// Fails if `JWKS_URL` is not set. A misconfigured deployment should
    /// fail at startup, not at the first authorization call.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwks_url = std::env::var("JWKS_URL").map_err(|_| ConfigError::Missing("JWKS_URL"))?;

        Ok(Self { jwks_url })
    }
}
