//! Page shell configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// HTML page shell served by the server
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// HTML template to serve; the built-in shell is used when unset
    pub template_path: Option<PathBuf>,

    /// Largest HTML body the response pipeline will buffer, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ShellConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_body_bytes == 0 {
            return Err(ValidationError::InvalidBodyLimit);
        }
        Ok(())
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            template_path: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}
