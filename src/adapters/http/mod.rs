//! HTTP adapters - the web tier.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/auth/callback`, `GET|POST /api/auth/logout`
//! - every other `GET` serves the page shell
//!
//! HTML responses pass through the preference negotiation pipeline.

pub mod auth;
pub mod cookies;
pub mod negotiation;
pub mod shell;
pub mod state;

pub use auth::auth_routes;
pub use cookies::{CookieSettings, AUTH_COOKIE_NAME, PROFILE_COOKIE_NAME};
pub use negotiation::{negotiate_preferences, ResponsePipeline};
pub use shell::{PageShell, DEFAULT_TEMPLATE};
pub use state::AppState;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full web tier router.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let pipeline = state.pipeline.clone();

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(auth_routes())
        .fallback(get(shell::serve_shell))
        .with_state(state)
        .layer(from_fn_with_state(pipeline, negotiate_preferences))
        .layer(TraceLayer::new_for_http());

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true),
        );
    }

    app
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::MockBackendClient;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(
            Arc::new(MockBackendClient::new()),
            CookieSettings::default(),
            PageShell::default(),
            1024 * 1024,
        );
        router(state, &[])
    }

    #[tokio::test]
    async fn health_is_not_negotiated() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn unmatched_path_serves_negotiated_shell() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/courses/abc")
                    .header(header::COOKIE, "cogito-theme=dark; cogito-device=mobile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(response.headers().get(header::LINK).is_some());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(r#"data-theme="dark" data-device="mobile""#));
    }
}
