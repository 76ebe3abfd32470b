//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COGITO` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cogito::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.backend.url);
//! ```

mod backend;
mod cookies;
mod error;
mod server;
mod shell;
mod storage;

pub use backend::BackendConfig;
pub use cookies::CookieConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use shell::ShellConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote tutoring backend
    pub backend: BackendConfig,

    /// Cookie lifetimes and flags
    #[serde(default)]
    pub cookies: CookieConfig,

    /// Local store used by the client commands
    #[serde(default)]
    pub storage: StorageConfig,

    /// Page shell served by the server
    #[serde(default)]
    pub shell: ShellConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COGITO` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COGITO__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `COGITO__BACKEND__URL=...` -> `backend.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COGITO")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.backend.validate(&self.server.environment)?;
        self.cookies.validate()?;
        self.storage.validate()?;
        self.shell.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
