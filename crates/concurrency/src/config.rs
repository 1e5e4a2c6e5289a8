//! Repository configuration
//!
//! Configuration can be built in code or parsed from a TOML fragment:
//!
//! ```toml
//! max_try = 5
//! ```
//!
//! Missing fields take their defaults.

use serde::Deserialize;
use thiserror::Error;

/// Default number of retries after the first attempt of an update
pub const DEFAULT_MAX_TRY: u32 = 3;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be parsed or did not match the expected shape
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for a [`Repository`](crate::Repository)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Retries allowed after the first attempt; an update runs at most
    /// `max_try + 1` times
    pub max_try: u32,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            max_try: DEFAULT_MAX_TRY,
        }
    }
}

impl RepositoryConfig {
    /// Config with an explicit retry bound
    pub fn with_max_try(max_try: u32) -> Self {
        Self { max_try }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}
