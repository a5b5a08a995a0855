use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{create_handler, health_handler, list_handler, route_handler};
use crate::routes;
use crate::state::AppState;

/// Build the HTTP surface: location endpoints, Swagger UI, CORS and tracing
///
/// Cross-origin requests are accepted from any origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::LOCATIONS, get(list_handler).post(create_handler))
        .route(routes::ROUTE, get(route_handler))
        .route(routes::HEALTH, get(health_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
