use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Token-to-user mapping behind the session guard.
///
/// Implementations own expiry; `get` must not return revoked or expired
/// sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session token for a user with a TTL.
    async fn insert(&self, token: &str, user_id: &str, ttl_seconds: u64) -> eyre::Result<()>;

    /// Look up the user id for a token, if the session is live.
    async fn get(&self, token: &str) -> eyre::Result<Option<String>>;

    /// Remove a session token.
    async fn remove(&self, token: &str) -> eyre::Result<()>;
}

fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

/// Redis-backed session store.
///
/// Sessions live under `session:{token}` keys and expire server-side via
/// Redis TTLs.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(manager: ConnectionManager) -> Self {
        tracing::info!("Redis session store initialized");
        Self { client: manager }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn insert(&self, token: &str, user_id: &str, ttl_seconds: u64) -> eyre::Result<()> {
        let mut conn = self.client.clone();
        conn.set_ex::<_, _, ()>(session_key(token), user_id, ttl_seconds)
            .await?;
        Ok(())
    }

    async fn get(&self, token: &str) -> eyre::Result<Option<String>> {
        let mut conn = self.client.clone();
        let user_id: Option<String> = conn.get(session_key(token)).await?;
        Ok(user_id)
    }

    async fn remove(&self, token: &str) -> eyre::Result<()> {
        let mut conn = self.client.clone();
        conn.del::<_, ()>(session_key(token)).await?;
        Ok(())
    }
}

/// In-memory session store for development and testing.
///
/// Ignores TTLs; sessions live until removed.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, token: &str, user_id: &str, _ttl_seconds: u64) -> eyre::Result<()> {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), user_id.to_string());
        Ok(())
    }

    async fn get(&self, token: &str) -> eyre::Result<Option<String>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> eyre::Result<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
