use crate::models::MediaStore;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /media handler - Return the full media store
///
/// Always succeeds: a missing or unreadable database is served as empty.
/// Also served at `/api/media`.
#[utoipa::path(
    get,
    path = routes::MEDIA,
    responses(
        (status = 200, description = "All stored image and video URLs", body = MediaStore)
    ),
    tag = "media"
)]
pub async fn list_handler(State(state): State<AppState>) -> (StatusCode, Json<MediaStore>) {
    let media = state.store.load().await;

    tracing::info!(
        "Listed {} images and {} videos",
        media.images.len(),
        media.videos.len()
    );

    (StatusCode::OK, Json(media))
}
