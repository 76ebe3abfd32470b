//! Backend API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Remote tutoring backend
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API
    pub url: String,

    /// Request timeout in seconds. Unset means requests never time out.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate backend configuration
    ///
    /// In production, requires HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if *environment == Environment::Production && !self.url.starts_with("https://") {
            return Err(ValidationError::BackendMustBeHttps);
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: None,
        }
    }
}
