//! Session-based authorization.
//!
//! This module provides:
//! - An opaque-token session store ([`SessionStore`]) with Redis-backed and
//!   in-memory implementations
//! - [`SessionAuth`], the issuing/resolving facade handed to middleware and
//!   to the login handlers
//! - [`session_auth_middleware`], the guard that turns a session token into
//!   an explicit [`CurrentUser`] request context, or short-circuits with
//!   `401 {"code":"unauthorized"}`
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::session::{SessionAuth, SessionConfig, session_auth_middleware};
//!
//! let auth = SessionAuth::redis(redis_manager, &SessionConfig::default());
//!
//! let protected = Router::new()
//!     .route("/events", get(list_events))
//!     .layer(axum::middleware::from_fn_with_state(
//!         auth.clone(),
//!         session_auth_middleware,
//!     ));
//! ```

pub mod config;
pub mod middleware;
pub mod store;

pub use config::SessionConfig;
pub use middleware::{
    extract_token_from_request, session_auth_middleware, CurrentUser, SESSION_COOKIE,
};
pub use store::{MemorySessionStore, RedisSessionStore, SessionStore};

use std::sync::Arc;
use uuid::Uuid;

/// Session issuing and resolution, backed by a [`SessionStore`].
///
/// Cloneable; shares the underlying store.
#[derive(Clone)]
pub struct SessionAuth {
    store: Arc<dyn SessionStore>,
    ttl_seconds: u64,
}

impl SessionAuth {
    /// Create a session auth facade over any store implementation.
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Convenience constructor for the Redis-backed store.
    pub fn redis(manager: redis::aio::ConnectionManager, config: &SessionConfig) -> Self {
        Self::new(Arc::new(RedisSessionStore::new(manager)), config)
    }

    /// Issue a new session for a user and return the opaque token.
    pub async fn create_session(&self, user_id: &str) -> eyre::Result<String> {
        let token = Uuid::new_v4().to_string();
        self.store
            .insert(&token, user_id, self.ttl_seconds)
            .await?;
        tracing::debug!(user_id = %user_id, "Session created");
        Ok(token)
    }

    /// Resolve a token to the owning user id, if the session is live.
    pub async fn resolve(&self, token: &str) -> eyre::Result<Option<String>> {
        self.store.get(token).await
    }

    /// Revoke a session token.
    pub async fn revoke(&self, token: &str) -> eyre::Result<()> {
        self.store.remove(token).await
    }

    /// The TTL applied to issued sessions, in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}
