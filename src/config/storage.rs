//! Local store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which `ContentStore` adapter backs the client
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Redis,
}

/// Local store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Adapter to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file adapter
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Connection URL for the Redis adapter
    pub redis_url: Option<String>,

    /// Key prefix for the Redis adapter
    #[serde(default = "default_redis_prefix")]
    pub redis_prefix: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend != StorageBackend::Redis {
            return Ok(());
        }
        match self.redis_url.as_deref() {
            None | Some("") => Err(ValidationError::MissingRequired("STORAGE__REDIS_URL")),
            Some(url) if !url.starts_with("redis://") && !url.starts_with("rediss://") => {
                Err(ValidationError::InvalidRedisUrl)
            }
            Some(_) => Ok(()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            redis_url: None,
            redis_prefix: default_redis_prefix(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(".cogito/local")
}

fn default_redis_prefix() -> String {
    "cogito".to_string()
}
