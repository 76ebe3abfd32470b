//! Axum middleware running the response pipeline over HTML pages.
//!
//! ```text
//! Request → handler → negotiate_preferences → buffered HTML → stages → Response
//! ```
//!
//! Only `text/html` responses are buffered and rewritten. Every response gets
//! the stages' client hint headers. HTML bodies that are not valid UTF-8 or
//! that declare a size above the buffer limit pass through otherwise untouched.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::page::{PageResponse, RequestView};
use super::pipeline::ResponsePipeline;

/// Middleware state - the shared pipeline.
pub type PipelineState = Arc<ResponsePipeline>;

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"))
        .unwrap_or(false)
}

/// Body size from the body itself, falling back to `Content-Length`.
fn declared_len(headers: &HeaderMap, body: &Body) -> Option<u64> {
    body.size_hint().upper().or_else(|| {
        headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    })
}

fn advertise(pipeline: &ResponsePipeline, headers: &mut HeaderMap) {
    let mut page = PageResponse::with_headers(String::new(), std::mem::take(headers));
    pipeline.advertise(&mut page);
    let (_, advertised) = page.into_parts();
    *headers = advertised;
}

pub async fn negotiate_preferences(
    State(pipeline): State<PipelineState>,
    request: Request,
    next: Next,
) -> Response {
    let view = RequestView::from_headers(request.headers().clone());

    let (mut parts, body) = next.run(request).await.into_parts();
    if !is_html(&parts.headers) {
        advertise(&pipeline, &mut parts.headers);
        return Response::from_parts(parts, body);
    }

    let limit = pipeline.max_body_bytes();
    if let Some(len) = declared_len(&parts.headers, &body) {
        if len > limit as u64 {
            tracing::warn!(len, limit, "HTML response above buffer limit, skipping negotiation");
            advertise(&pipeline, &mut parts.headers);
            return Response::from_parts(parts, body);
        }
    }

    let bytes = match to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer HTML response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let html = match String::from_utf8(bytes.to_vec()) {
        Ok(html) => html,
        Err(_) => {
            tracing::warn!("HTML response is not valid UTF-8, skipping negotiation");
            advertise(&pipeline, &mut parts.headers);
            return Response::from_parts(parts, Body::from(bytes));
        }
    };

    let mut page = PageResponse::with_headers(html, std::mem::take(&mut parts.headers));
    pipeline.run(&view, &mut page);

    let (html, mut headers) = page.into_parts();
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(html.len()));
    parts.headers = headers;

    Response::from_parts(parts, Body::from(html))
}
