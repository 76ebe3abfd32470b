//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind host")]
    InvalidHost,

    #[error("Invalid backend URL format")]
    InvalidBackendUrl,

    #[error("Backend URL must use HTTPS in production")]
    BackendMustBeHttps,

    #[error("Invalid backend timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Cookie max age must be between 1 and 3650 days")]
    InvalidCookieMaxAge,

    #[error("Response body limit must be positive")]
    InvalidBodyLimit,
}
