use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps each failure to its HTTP status and renders it as an [`ErrorResponse`].
#[derive(Debug)]
pub enum ApiError {
    /// Body parsed but `url` or `type` is missing or invalid
    InvalidPayload(String),
    /// Body is not JSON, or not sent as JSON
    JsonError(JsonRejection),
    /// Nothing matched on delete
    /// `kind` is the type as sent, which may name no collection
    MediaNotFound { url: String, kind: String },
    /// Missing or wrong `x-secret-key` on a write
    Forbidden,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidPayload(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid payload: {}", msg),
            ),
            ApiError::JsonError(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid payload: {}", rejection.body_text()),
            ),
            ApiError::MediaNotFound { url, kind } => (
                StatusCode::NOT_FOUND,
                format!("Media not found: {} '{}'", kind, url),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden: missing or invalid x-secret-key header".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::JsonError(rejection)
    }
}
