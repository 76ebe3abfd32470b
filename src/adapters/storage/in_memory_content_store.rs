//! In-Memory Content Store Adapter
//!
//! Keeps cached values in a map shared behind an `RwLock`.
//! Useful for tests and for the server's default configuration.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ContentStore, ContentStoreError};

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Get the number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ContentStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ContentStoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ContentStoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ContentStoreError> {
        self.entries.write().await.clear();
        Ok(())
    }
}
