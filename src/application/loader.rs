//! ContentLoader - cache-or-fetch loading of page payloads.
//!
//! Each page payload is looked up in the local store first. On a miss the
//! loader raises the loading flag, makes exactly one authenticated backend
//! call, stores the response text verbatim under the page's cache key and
//! returns the parsed payload. There is no retry and no expiry.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::state::LoadingState;
use crate::domain::{
    day_number, BearerToken, CacheKey, CourseList, DailyContent, WeeklySchedule, TOKEN_KEY,
};
use crate::ports::{
    BackendClient, BackendError, ContentStore, ContentStoreError, DayContentRequest,
    ScheduleRequest,
};

/// Errors surfaced by the loader.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("No session token in local store")]
    MissingToken,

    #[error(transparent)]
    Store(#[from] ContentStoreError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Malformed payload: {0}")]
    Parse(String),
}

/// Loads page payloads through the local store.
#[derive(Clone)]
pub struct ContentLoader {
    store: Arc<dyn ContentStore>,
    backend: Arc<dyn BackendClient>,
    loading: LoadingState,
}

impl ContentLoader {
    pub fn new(
        store: Arc<dyn ContentStore>,
        backend: Arc<dyn BackendClient>,
        loading: LoadingState,
    ) -> Self {
        Self {
            store,
            backend,
            loading,
        }
    }

    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    /// Flashcards and quiz for one course day.
    ///
    /// `day_slug` is the route segment (`day_1` .. `day_7`). Slugs outside
    /// that table are still sent, without a day number.
    pub async fn load_day_content(
        &self,
        course_id: &str,
        day_slug: &str,
    ) -> Result<DailyContent, LoaderError> {
        let key = CacheKey::day_content(course_id, day_slug);
        let request = DayContentRequest {
            course_id: course_id.to_string(),
            day_number: day_number(day_slug),
        };
        if request.day_number.is_none() {
            tracing::warn!(day_slug, "Unmapped day slug, sending request without day number");
        }

        let backend = &self.backend;
        self.cached(&key, |token| async move {
            backend.generate_day_content(&token, &request).await
        })
        .await
    }

    /// Weekly schedule for one course.
    pub async fn load_schedule(&self, course_id: &str) -> Result<WeeklySchedule, LoaderError> {
        let key = CacheKey::schedule(course_id);
        let request = ScheduleRequest {
            course_id: course_id.to_string(),
        };

        let backend = &self.backend;
        self.cached(&key, |token| async move {
            backend.get_schedule(&token, &request).await
        })
        .await
    }

    /// Course listing. Always fetched, never cached.
    pub async fn load_courses(&self) -> Result<CourseList, LoaderError> {
        let token = self.token().await?;
        let body = self.backend.list_courses(&token).await?;
        parse(&body)
    }

    async fn token(&self) -> Result<BearerToken, LoaderError> {
        self.store
            .get(TOKEN_KEY)
            .await?
            .and_then(|raw| BearerToken::new(raw))
            .ok_or(LoaderError::MissingToken)
    }

    async fn cached<T, F, Fut>(&self, key: &CacheKey, fetch: F) -> Result<T, LoaderError>
    where
        T: DeserializeOwned,
        F: FnOnce(BearerToken) -> Fut,
        Fut: Future<Output = Result<String, BackendError>>,
    {
        if let Some(raw) = self.store.get(key.as_str()).await? {
            tracing::debug!(key = %key, "Cache hit");
            return parse(&raw);
        }

        let token = self.token().await?;

        tracing::debug!(key = %key, "Cache miss, fetching from backend");
        self.loading.set(true);
        let result = self.fetch_and_store(key, fetch(token)).await;
        self.loading.set(false);

        result
    }

    async fn fetch_and_store<T, Fut>(&self, key: &CacheKey, fetch: Fut) -> Result<T, LoaderError>
    where
        T: DeserializeOwned,
        Fut: Future<Output = Result<String, BackendError>>,
    {
        let body = fetch.await?;
        let value = parse(&body)?;
        self.store.set(key.as_str(), &body).await?;
        Ok(value)
    }
}

fn parse<T: DeserializeOwned>(raw: &str) -> Result<T, LoaderError> {
    serde_json::from_str(raw).map_err(|e| LoaderError::Parse(e.to_string()))
}
