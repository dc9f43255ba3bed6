use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET / handler - Plain-text banner
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Service banner", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn root_handler() -> &'static str {
    "🎂 Birthday API running"
}

/// GET /health handler - Health check endpoint
///
/// Verifies that the data directory holding the media database is reachable.
/// Returns 200 OK when it is, 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.check().await {
        Ok(()) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed: {:#}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot access media database: {:#}", e),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::Request, routing::get, Router};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup_test_app(data_dir: PathBuf) -> Router {
        let config = Config {
            data_dir,
            seed_file: None,
            secret_key: None,
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
        };

        Router::new()
            .route(routes::ROOT, get(root_handler))
            .route(routes::HEALTH, get(health_handler))
            .with_state(AppState::new(config))
    }

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let dir = TempDir::new().unwrap();
        let app = setup_test_app(dir.path().to_path_buf());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response_json.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let dir = TempDir::new().unwrap();
        let app = setup_test_app(dir.path().join("does-not-exist"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: UnhealthyResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response_json.status, "unhealthy");
        assert!(response_json.error.contains("does-not-exist"));
    }

    #[tokio::test]
    async fn test_root_banner() {
        let dir = TempDir::new().unwrap();
        let app = setup_test_app(dir.path().to_path_buf());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Birthday API running"));
    }
}
