use crate::error::{ApiError, ErrorResponse};
use crate::models::RouteQuery;
use crate::routes;
use crate::state::AppState;
use axum::extract::{Query, State};

/// GET /api/locations/route handler - Placeholder route between two names
///
/// Unknown names still answer 200 with the invalid-locations text.
#[utoipa::path(
    get,
    path = routes::ROUTE,
    params(RouteQuery),
    responses(
        (status = 200, description = "Route description or invalid-locations notice", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing start or end parameter"),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn route_handler(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<String, ApiError> {
    let route = state.service.get_route(&query.start, &query.end).await?;

    tracing::info!("Route requested from '{}' to '{}'", query.start, query.end);
    Ok(route)
}
