//! Optional cache-client lifecycle.
//!
//! The handle has three observable states: `Absent` (no URL configured, or
//! the connection attempt failed), `Connected`, and `Disconnected` (after
//! explicit teardown). Connecting is transient inside [`Cache::connect`].
//! An `Absent` or `Disconnected` handle answers every read with a miss and
//! swallows every write.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Observable cache-handle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No cache configured, or the connection attempt failed.
    Absent,
    Connected,
    /// Torn down via [`Cache::close`].
    Disconnected,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

enum State {
    Absent,
    Connected(ConnectionManager),
    Disconnected,
}

/// Process-scoped cache handle. Clone is cheap; all clones share one state,
/// so `close` on any clone tears the connection down for all of them.
#[derive(Clone)]
pub struct Cache {
    inner: Arc<RwLock<State>>,
}

impl Cache {
    /// Connect to Redis, best-effort.
    ///
    /// With `url == None` this returns immediately without any network
    /// activity. A failed handshake is logged and downgraded to an absent
    /// handle; this function never surfaces an error to the caller.
    pub async fn connect(url: Option<&str>) -> Self {
        let state = match url {
            None => {
                debug!("no cache URL configured, running without cache");
                State::Absent
            }
            Some(url) => match Self::handshake(url).await {
                Ok(manager) => {
                    info!("cache connected");
                    State::Connected(manager)
                }
                Err(e) => {
                    warn!(error = %e, "cache connection failed, running without cache");
                    State::Absent
                }
            },
        };
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// A handle that never connects. Equivalent to `connect(None)` but sync.
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(RwLock::new(State::Absent)),
        }
    }

    async fn handshake(url: &str) -> redis::RedisResult<ConnectionManager> {
        let client = redis::Client::open(url)?;
        ConnectionManager::new(client).await
    }

    pub async fn status(&self) -> CacheStatus {
        match &*self.inner.read().await {
            State::Absent => CacheStatus::Absent,
            State::Connected(_) => CacheStatus::Connected,
            State::Disconnected => CacheStatus::Disconnected,
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.status().await == CacheStatus::Connected
    }

    /// Tear down the connection. Idempotent: closing an absent, never-connected,
    /// or already-closed handle is a no-op.
    pub async fn close(&self) {
        let mut state = self.inner.write().await;
        if matches!(*state, State::Connected(_)) {
            info!("cache disconnected");
            *state = State::Disconnected;
        }
    }

    fn manager_or_none(state: &State) -> Option<ConnectionManager> {
        match state {
            State::Connected(manager) => Some(manager.clone()),
            _ => None,
        }
    }

    /// Read a JSON value. Any miss, decode failure, or Redis error is a `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = Self::manager_or_none(&*self.inner.read().await)?;
        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(json)) => serde_json::from_str(&json).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "cache read failed");
                None
            }
        }
    }

    /// Write a JSON value with a TTL, best-effort.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let Some(mut conn) = Self::manager_or_none(&*self.inner.read().await) else {
            return;
        };
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "cache serialization failed");
                return;
            }
        };
        if let Err(e) = conn.set_ex::<_, _, ()>(key, json, ttl_secs).await {
            warn!(key, error = %e, "cache write failed");
        }
    }

    /// Drop a key, best-effort.
    pub async fn invalidate(&self, key: &str) {
        let Some(mut conn) = Self::manager_or_none(&*self.inner.read().await) else {
            return;
        };
        if let Err(e) = conn.del::<_, ()>(key).await {
            warn!(key, error = %e, "cache invalidation failed");
        }
    }
}

/// Cache key for a user's entity list (`stride:{user_id}:{entity}`).
pub fn list_key(user_id: &str, entity: &str) -> String {
    format!("stride:{}:{}", user_id, entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_without_url_is_absent() {
        let cache = Cache::connect(None).await;
        assert_eq!(cache.status().await, CacheStatus::Absent);
        assert!(!cache.is_connected().await);
    }

    #[tokio::test]
    async fn connect_to_unreachable_host_is_absent() {
        // Nothing listens on port 1; connect must resolve without error.
        let cache = Cache::connect(Some("redis://127.0.0.1:1")).await;
        assert_eq!(cache.status().await, CacheStatus::Absent);
    }

    #[tokio::test]
    async fn connect_with_invalid_url_is_absent() {
        let cache = Cache::connect(Some("not a url")).await;
        assert_eq!(cache.status().await, CacheStatus::Absent);
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let cache = Cache::connect(None).await;
        cache.close().await;
        cache.close().await;
        assert_eq!(cache.status().await, CacheStatus::Absent);
    }

    #[tokio::test]
    async fn absent_handle_degrades_to_noops() {
        let cache = Cache::disabled();
        cache.put_json("stride:u1:goals", &vec!["a", "b"], 60).await;
        let hit: Option<Vec<String>> = cache.get_json("stride:u1:goals").await;
        assert!(hit.is_none());
        cache.invalidate("stride:u1:goals").await;
    }

    #[test]
    fn list_key_layout() {
        assert_eq!(list_key("u1", "goals"), "stride:u1:goals");
    }
}
