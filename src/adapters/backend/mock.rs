//! Mock backend adapter for testing.
//!
//! Returns canned responses and records every call, so tests can assert
//! both what was sent and how many network calls happened.
//!
//! # Example
//!
//! ```ignore
//! let backend = MockBackendClient::new()
//!     .with_profile(profile)
//!     .with_schedule("course-1", r#"{"topic":"Rust","schedule":{...}}"#);
//!
//! let text = backend.get_schedule(&token, &request).await?;
//! assert_eq!(backend.call_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{BearerToken, Profile};
use crate::ports::{BackendClient, BackendError, DayContentRequest, ScheduleRequest};

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Profile { token: String },
    DayContent { token: String, request: DayContentRequest },
    Schedule { token: String, request: ScheduleRequest },
    Courses { token: String },
    Logout { token: String },
}

#[derive(Debug, Default)]
struct Responses {
    profile: Option<Profile>,
    day_content: HashMap<(String, Option<u8>), String>,
    schedules: HashMap<String, String>,
    courses: Option<String>,
    forced_status: Option<u16>,
}

/// Mock backend client.
#[derive(Debug, Default)]
pub struct MockBackendClient {
    responses: Mutex<Responses>,
    calls: Mutex<Vec<RecordedCall>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockBackendClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile returned by `fetch_profile`. Without one, `/profile` answers 404.
    pub fn with_profile(self, profile: Profile) -> Self {
        locked(&self.responses).profile = Some(profile);
        self
    }

    /// Raw body returned for one course/day pair.
    pub fn with_day_content(
        self,
        course_id: impl Into<String>,
        day_number: Option<u8>,
        body: impl Into<String>,
    ) -> Self {
        locked(&self.responses)
            .day_content
            .insert((course_id.into(), day_number), body.into());
        self
    }

    /// Raw body returned for one course schedule.
    pub fn with_schedule(self, course_id: impl Into<String>, body: impl Into<String>) -> Self {
        locked(&self.responses)
            .schedules
            .insert(course_id.into(), body.into());
        self
    }

    /// Raw body returned by `/tutor`.
    pub fn with_courses(self, body: impl Into<String>) -> Self {
        locked(&self.responses).courses = Some(body.into());
        self
    }

    /// Make every call fail with the given status.
    pub fn with_status(self, status: u16) -> Self {
        locked(&self.responses).forced_status = Some(status);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        locked(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    fn record(&self, call: RecordedCall) -> Result<(), BackendError> {
        locked(&self.calls).push(call);
        match locked(&self.responses).forced_status {
            Some(status) => Err(BackendError::Status {
                status,
                body: "forced failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> BackendError {
    BackendError::Status {
        status: 404,
        body: format!("{what} not found"),
    }
}

#[async_trait]
impl BackendClient for MockBackendClient {
    async fn fetch_profile(&self, token: &BearerToken) -> Result<Profile, BackendError> {
        self.record(RecordedCall::Profile {
            token: token.expose().to_string(),
        })?;
        locked(&self.responses)
            .profile
            .clone()
            .ok_or_else(|| not_found("User"))
    }

    async fn generate_day_content(
        &self,
        token: &BearerToken,
        request: &DayContentRequest,
    ) -> Result<String, BackendError> {
        self.record(RecordedCall::DayContent {
            token: token.expose().to_string(),
            request: request.clone(),
        })?;
        locked(&self.responses)
            .day_content
            .get(&(request.course_id.clone(), request.day_number))
            .cloned()
            .ok_or_else(|| not_found("Course"))
    }

    async fn get_schedule(
        &self,
        token: &BearerToken,
        request: &ScheduleRequest,
    ) -> Result<String, BackendError> {
        self.record(RecordedCall::Schedule {
            token: token.expose().to_string(),
            request: request.clone(),
        })?;
        locked(&self.responses)
            .schedules
            .get(&request.course_id)
            .cloned()
            .ok_or_else(|| not_found("Course"))
    }

    async fn list_courses(&self, token: &BearerToken) -> Result<String, BackendError> {
        self.record(RecordedCall::Courses {
            token: token.expose().to_string(),
        })?;
        Ok(locked(&self.responses)
            .courses
            .clone()
            .unwrap_or_else(|| r#"{"courses":null}"#.to_string()))
    }

    async fn logout(&self, token: &BearerToken) -> Result<(), BackendError> {
        self.record(RecordedCall::Logout {
            token: token.expose().to_string(),
        })
    }
}
