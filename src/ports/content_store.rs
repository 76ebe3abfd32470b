//! Content Store Port - local key-value persistence for cached payloads.
//!
//! Plays the role browser local storage plays for a web client: string keys,
//! string values, no expiry. Values are stored verbatim.

use async_trait::async_trait;

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Port for reading and writing locally cached values
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, ContentStoreError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), ContentStoreError>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), ContentStoreError>;

    /// Remove every key owned by this store
    async fn clear(&self) -> Result<(), ContentStoreError>;
}
