//! Authentication callback and logout routes.

use axum::{
    extract::{Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::cookies::{
    clear_session_cookie, session_cookie, AUTH_COOKIE_NAME, PROFILE_COOKIE_NAME,
};
use super::state::AppState;
use crate::domain::BearerToken;

pub const ERROR_REDIRECT: &str = "/error";
pub const HOME_REDIRECT: &str = "/";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/callback", get(callback))
        .route("/api/auth/logout", get(logout).post(logout))
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    token: Option<String>,
}

async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Response), Response> {
    let token = params
        .token
        .and_then(|raw| BearerToken::new(raw))
        .ok_or_else(|| {
            tracing::warn!("Auth callback without token");
            found(ERROR_REDIRECT)
        })?;

    let jar = jar.add(session_cookie(
        AUTH_COOKIE_NAME,
        token.expose().to_string(),
        &state.cookies,
    ));

    let profile = match state.backend.fetch_profile(&token).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!(error = %e, "Profile request failed");
            return Ok((jar, found(ERROR_REDIRECT)));
        }
    };

    let profile_json = match serde_json::to_string(&profile) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Profile serialization failed");
            return Ok((jar, found(ERROR_REDIRECT)));
        }
    };

    let jar = jar.add(session_cookie(PROFILE_COOKIE_NAME, profile_json, &state.cookies));

    tracing::info!(user_id = %profile.id, "Login successful");

    Ok((jar, found(HOME_REDIRECT)))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let token = jar
        .get(AUTH_COOKIE_NAME)
        .and_then(|cookie| BearerToken::new(cookie.value()));

    if let Some(token) = token {
        if let Err(e) = state.backend.logout(&token).await {
            tracing::warn!(error = %e, "Backend logout failed");
        }
    }

    let jar = jar
        .remove(clear_session_cookie(AUTH_COOKIE_NAME))
        .remove(clear_session_cookie(PROFILE_COOKIE_NAME));

    (jar, found(HOME_REDIRECT))
}

/// `302 Found` to `location`.
fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}
