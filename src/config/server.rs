//! Web tier listener settings

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Where the web tier listens and how it logs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,

    /// Comma-separated origins allowed to call the auth routes cross-origin
    pub cors_origins: Option<String>,
}

/// Deployment environment. Production requires an HTTPS backend and logs JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidHost)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5173,
            environment: Environment::Development,
            log_level: "info,cogito=debug,tower_http=info".to_string(),
            cors_origins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5173");
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173, https://cogito.example,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["http://localhost:5173", "https://cogito.example"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn port_zero_and_bad_host_rejected() {
        let zero = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ValidationError::InvalidPort));

        let bad_host = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert_eq!(bad_host.validate(), Err(ValidationError::InvalidHost));
    }

    #[test]
    fn staging_is_not_an_environment() {
        let parsed: Result<Environment, _> = serde_json::from_str("\"staging\"");
        assert!(parsed.is_err());
        let parsed: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(parsed, Environment::Production);
    }
}
