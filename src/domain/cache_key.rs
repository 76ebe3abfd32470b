//! Deterministic keys for locally cached payloads.

use std::fmt;

/// Store key holding the bearer token.
pub const TOKEN_KEY: &str = "cogito-token";

/// Store key holding the last chosen theme.
pub const THEME_KEY: &str = "cogito-theme";

/// Key under which a fetched JSON payload is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Day content for one course: `{course_id}-content-{day_slug}`.
    pub fn day_content(course_id: &str, day_slug: &str) -> Self {
        Self(format!("{course_id}-content-{day_slug}"))
    }

    /// Weekly schedule for one course, keyed by the bare course id.
    pub fn schedule(course_id: &str) -> Self {
        Self(course_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
