use crate::error::{ApiError, ErrorResponse};
use crate::models::Location;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /api/locations handler - List all stored locations
#[utoipa::path(
    get,
    path = routes::LOCATIONS,
    responses(
        (status = 200, description = "All stored locations", body = Vec<Location>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Location>>), ApiError> {
    let locations = state.service.get_all_locations().await?;

    tracing::info!("Listed {} locations", locations.len());
    Ok((StatusCode::OK, Json(locations)))
}
