//! reqwest adapter for the tutoring backend.
//!
//! # Example
//!
//! ```ignore
//! use cogito::adapters::backend::{HttpBackendClient, HttpBackendConfig};
//!
//! let client = HttpBackendClient::new(HttpBackendConfig::new("http://localhost:8000"))?;
//! let profile = client.fetch_profile(&token).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::domain::{BearerToken, Profile};
use crate::ports::{BackendClient, BackendError, DayContentRequest, ScheduleRequest};

/// Configuration for the backend HTTP client.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL, e.g. `https://api.cogito.example`
    pub base_url: String,

    /// Optional per-request timeout. Unset means no timeout.
    pub timeout: Option<Duration>,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Backend client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    config: HttpBackendConfig,
    http_client: reqwest::Client,
}

impl HttpBackendClient {
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Send a request and return the body text of a successful response.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &'static str,
    ) -> Result<String, BackendError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "Backend request failed");
            BackendError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "Backend returned error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(endpoint, bytes = body.len(), "Backend response received");
        Ok(body)
    }

    fn get(&self, path: &str, token: &BearerToken) -> reqwest::RequestBuilder {
        self.http_client
            .get(self.config.endpoint(path))
            .header(AUTHORIZATION, token.authorization())
    }

    fn post(&self, path: &str, token: &BearerToken) -> reqwest::RequestBuilder {
        self.http_client
            .post(self.config.endpoint(path))
            .header(AUTHORIZATION, token.authorization())
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn fetch_profile(&self, token: &BearerToken) -> Result<Profile, BackendError> {
        let body = self.send(self.get("/profile", token), "/profile").await?;
        serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    async fn generate_day_content(
        &self,
        token: &BearerToken,
        request: &DayContentRequest,
    ) -> Result<String, BackendError> {
        self.send(
            self.post("/generate-day-content", token).json(request),
            "/generate-day-content",
        )
        .await
    }

    async fn get_schedule(
        &self,
        token: &BearerToken,
        request: &ScheduleRequest,
    ) -> Result<String, BackendError> {
        self.send(self.post("/get-schedule", token).json(request), "/get-schedule")
            .await
    }

    async fn list_courses(&self, token: &BearerToken) -> Result<String, BackendError> {
        self.send(self.get("/tutor", token), "/tutor").await
    }

    async fn logout(&self, token: &BearerToken) -> Result<(), BackendError> {
        self.send(self.post("/logout", token), "/logout").await?;
        Ok(())
    }
}
