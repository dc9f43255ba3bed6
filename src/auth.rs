//! Shared-secret gate for write requests.
//!
//! When `MEDIA_SECRET_KEY` is configured, every request that is not a read
//! (GET, HEAD, OPTIONS) must carry an `x-secret-key` header with the same
//! value. This is a convenience switch for a personal deployment, not an
//! authentication scheme.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::routes::SECRET_HEADER;
use crate::state::AppState;

/// Whether a request with the given method and header value may proceed
pub fn is_authorized(expected: Option<&str>, method: &Method, provided: Option<&str>) -> bool {
    if matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS) {
        return true;
    }
    match expected {
        None => true,
        Some(secret) => provided == Some(secret),
    }
}

pub async fn require_secret(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    if !is_authorized(state.config.secret_key.as_deref(), request.method(), provided) {
        tracing::warn!(
            "Rejected {} {}: missing or wrong {}",
            request.method(),
            request.uri().path(),
            SECRET_HEADER
        );
        return ApiError::Forbidden.into_response();
    }

    next.run(request).await
}
