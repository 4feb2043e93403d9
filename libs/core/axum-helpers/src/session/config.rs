use core_config::{env_or_default, ConfigError, FromEnv};

/// Default session lifetime: 7 days.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 604_800;

/// Session configuration
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Time-to-live applied to issued sessions, in seconds
    pub ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl FromEnv for SessionConfig {
    /// Reads `SESSION_TTL_SECS` (default: 604800, i.e. 7 days).
    fn from_env() -> Result<Self, ConfigError> {
        let ttl_seconds = env_or_default("SESSION_TTL_SECS", "604800")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "SESSION_TTL_SECS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self { ttl_seconds })
    }
}
