//! Backend Client Port - calls to the remote content backend.
//!
//! Content endpoints return the raw response text so callers can cache the
//! exact bytes the backend produced; only `/profile` is decoded here since
//! its result is never cached.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{BearerToken, Profile};

/// Errors returned by backend calls
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Transport(String),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// HTTP status for [`BackendError::Status`], `None` otherwise
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Body of `POST /generate-day-content`.
///
/// An unmapped day slug leaves `day_number` empty and the field is left out
/// of the JSON body entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayContentRequest {
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u8>,
}

/// Body of `POST /get-schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRequest {
    pub course_id: String,
}

/// Port for the remote tutoring backend
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// `GET /profile`
    async fn fetch_profile(&self, token: &BearerToken) -> Result<Profile, BackendError>;

    /// `POST /generate-day-content`, raw JSON text
    async fn generate_day_content(
        &self,
        token: &BearerToken,
        request: &DayContentRequest,
    ) -> Result<String, BackendError>;

    /// `POST /get-schedule`, raw JSON text
    async fn get_schedule(
        &self,
        token: &BearerToken,
        request: &ScheduleRequest,
    ) -> Result<String, BackendError>;

    /// `GET /tutor`, raw JSON text
    async fn list_courses(&self, token: &BearerToken) -> Result<String, BackendError>;

    /// `POST /logout`
    async fn logout(&self, token: &BearerToken) -> Result<(), BackendError>;
}
