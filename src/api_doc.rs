use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{MediaKind, MediaRequest, MediaResponse, MediaStore};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "keepsake-media API",
        version = "1.0.0",
        description = "Stores the image and video URLs shown in the birthday gallery. Every /media operation is also served at /api/media."
    ),
    paths(
        handlers::health::root_handler,
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::add::add_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            MediaStore,
            MediaKind,
            MediaRequest,
            MediaResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "media", description = "Gallery media operations")
    )
)]
pub struct ApiDoc;
