use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::auth::require_secret;
use crate::handlers::{add_handler, delete_handler, health_handler, list_handler, root_handler};
use crate::routes;
use crate::state::AppState;

/// Build the full router: media routes under both prefixes, health, docs
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(routes::SECRET_HEADER),
        ]);

    let media = get(list_handler).post(add_handler).delete(delete_handler);

    let media_routes = Router::new()
        .route(routes::MEDIA, media.clone())
        .route(routes::API_MEDIA, media)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_secret));

    Router::new()
        .route(routes::ROOT, get(root_handler))
        .route(routes::HEALTH, get(health_handler))
        .merge(media_routes)
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
