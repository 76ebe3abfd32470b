//! Redis-backed content store for shared deployments.
//!
//! Every key is namespaced with a configurable prefix so several stores can
//! share one Redis database.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{ContentStore, ContentStoreError};

/// Redis key-value store.
#[derive(Clone)]
pub struct RedisContentStore {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisContentStore {
    /// Create a store over an existing connection.
    pub fn new(conn: MultiplexedConnection, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    /// Open a multiplexed connection to `url` and wrap it.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self, ContentStoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn, prefix))
    }

    fn redis_key(&self, key: &str) -> String {
        namespaced(&self.prefix, key)
    }
}

fn namespaced(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}:{key}")
    }
}

/// Key pattern covering this store's namespace. Without a prefix the pattern
/// would match the whole database, so clearing is refused.
fn clear_pattern(prefix: &str) -> Result<String, ContentStoreError> {
    if prefix.is_empty() {
        return Err(ContentStoreError::InvalidKey(
            "refusing to clear redis without a key prefix".to_string(),
        ));
    }
    Ok(namespaced(prefix, "*"))
}

fn unavailable(e: redis::RedisError) -> ContentStoreError {
    ContentStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl ContentStore for RedisContentStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ContentStoreError> {
        let mut conn = self.conn.clone();
        conn.get(self.redis_key(key)).await.map_err(unavailable)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ContentStoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.redis_key(key), value)
            .await
            .map_err(unavailable)
    }

    async fn remove(&self, key: &str) -> Result<(), ContentStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.redis_key(key))
            .await
            .map_err(unavailable)
    }

    async fn clear(&self) -> Result<(), ContentStoreError> {
        let pattern = clear_pattern(&self.prefix)?;
        let mut conn = self.conn.clone();

        let keys: Vec<String> = conn.keys(pattern).await.map_err(unavailable)?;
        if keys.is_empty() {
            return Ok(());
        }

        conn.del::<_, ()>(keys).await.map_err(unavailable)
    }
}
