use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::config::CookieConfig;

pub const AUTH_COOKIE_NAME: &str = "cogito-auth";
pub const PROFILE_COOKIE_NAME: &str = "cogito-profile";

/// Cookie lifetimes and flags resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub preference_max_age: Duration,
    pub session_max_age: Duration,
    pub secure: bool,
}

impl CookieSettings {
    pub fn from_config(config: &CookieConfig) -> Self {
        Self {
            preference_max_age: Duration::days(config.preference_max_age_days),
            session_max_age: Duration::days(config.session_max_age_days),
            secure: config.secure,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::from_config(&CookieConfig::default())
    }
}

/// Readable from page scripts, strict same-site, root path.
fn persistent_cookie(
    name: &str,
    value: String,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    let mut cookie = Cookie::build((name.to_string(), value))
        .http_only(false)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(max_age)
        .build();

    // Max-Age alone is enough when the expiry date is not representable.
    if let Some(expires) = OffsetDateTime::now_utc().checked_add(max_age) {
        cookie.set_expires(expires);
    }
    cookie
}

/// Create a preference cookie (`cogito-theme`, `cogito-device`).
pub(super) fn preference_cookie(
    name: &str,
    value: &str,
    settings: &CookieSettings,
) -> Cookie<'static> {
    persistent_cookie(
        name,
        value.to_string(),
        settings.preference_max_age,
        settings.secure,
    )
}

/// Create a session cookie (`cogito-auth`, `cogito-profile`).
pub(super) fn session_cookie(name: &str, value: String, settings: &CookieSettings) -> Cookie<'static> {
    persistent_cookie(name, value, settings.session_max_age, settings.secure)
}

/// Create removal cookie for a session cookie.
pub(super) fn clear_session_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}
