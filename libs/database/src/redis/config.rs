#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// Redis connection settings
#[derive(Clone, Debug)]
pub struct RedisConfig {
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379")
    pub url: String,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Load RedisConfig from environment variables
///
/// - `REDIS_URL` (required) - connection string
#[cfg(feature = "config")]
impl FromEnv for RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = core_config::env_required("REDIS_URL")?;
        Ok(Self { url })
    }
}
