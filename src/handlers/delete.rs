use crate::error::{ApiError, ErrorResponse};
use crate::models::{MediaKind, MediaRequest, MediaResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

/// DELETE /media handler - Forget an image or video URL
///
/// Removes every matching entry from the collection named by `type`.
/// Answers 404 without touching the file when nothing matched, including when
/// `type` names no collection at all. Also served at `/api/media`.
#[utoipa::path(
    delete,
    path = routes::MEDIA,
    request_body = MediaRequest,
    params(
        ("x-secret-key" = Option<String>, Header, description = "Shared write secret, required when the server has one configured")
    ),
    responses(
        (status = 200, description = "Media deleted", body = MediaResponse),
        (status = 400, description = "Missing url or type", body = ErrorResponse),
        (status = 403, description = "Missing or wrong secret", body = ErrorResponse),
        (status = 404, description = "URL not stored", body = ErrorResponse)
    ),
    tag = "media"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MediaResponse>), ApiError> {
    let Json(request) = payload?;
    let (url, kind) = request.validate_delete().map_err(ApiError::InvalidPayload)?;

    let mut media = state.store.load().await;
    let removed = match kind.parse::<MediaKind>() {
        Ok(collection) => media.remove(collection, &url),
        Err(_) => 0,
    };
    if removed == 0 {
        tracing::info!("Delete requested for unknown {} {}", kind, url);
        return Err(ApiError::MediaNotFound { url, kind });
    }

    state.store.save(&media).await;
    tracing::info!("Deleted {} {} ({} entries)", kind, url, removed);

    Ok((
        StatusCode::OK,
        Json(MediaResponse {
            message: "Media deleted".to_string(),
            url,
        }),
    ))
}
