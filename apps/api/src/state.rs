//! Shared application state passed to route constructors.

use axum_helpers::SessionAuth;

/// Cloned per router; all members are cheap handle clones.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB database handle
    pub db: database::mongodb::Database,
    /// Redis connection manager
    pub redis: database::redis::ConnectionManager,
    /// Session issuing/resolution used by the guard and the auth routes
    pub sessions: SessionAuth,
}
