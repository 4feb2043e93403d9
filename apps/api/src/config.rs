use axum_helpers::SessionConfig;
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use database::redis::RedisConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongo: MongoConfig,
    pub redis: RedisConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongo = MongoConfig::from_env()?; // Required - fails if not set
        let redis = RedisConfig::from_env()?; // Required - fails if not set
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=8080
        let session = SessionConfig::from_env()?; // Default TTL: 7 days

        Ok(Self {
            app: app_info!(),
            mongo,
            redis,
            server,
            session,
            environment,
        })
    }
}
