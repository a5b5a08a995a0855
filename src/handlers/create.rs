use crate::error::{ApiError, ErrorResponse};
use crate::models::{Location, NewLocation};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /api/locations handler - Store a new location
///
/// The body is stored as-is and the response carries the assigned id.
#[utoipa::path(
    post,
    path = routes::LOCATIONS,
    request_body = NewLocation,
    responses(
        (status = 200, description = "Location stored successfully", body = Location),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "JSON body missing the name field"),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    Json(candidate): Json<NewLocation>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    let location = state.service.add_location(candidate).await?;

    tracing::info!("Stored location '{}' with id: {}", location.name, location.id);
    Ok((StatusCode::OK, Json(location)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;
    use crate::service::LocationService;
    use crate::store::MemoryStore;
    use axum::{body::Body, http::Request, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn setup_test_app() -> Router {
        let state = AppState {
            service: LocationService::new(Arc::new(MemoryStore::new())),
        };
        app::router(state)
    }

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(routes::LOCATIONS)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_endpoint_success() {
        let app = setup_test_app();

        let test_data = serde_json::json!({
            "name": "Library",
            "latitude": 12.9356,
            "longitude": 77.6192,
            "description": "Main campus library"
        });

        let response = app
            .oneshot(post(serde_json::to_string(&test_data).unwrap()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let location: Location = serde_json::from_slice(&body).unwrap();
        assert_eq!(location.id, 1);
        assert_eq!(location.name, "Library");
        assert_eq!(location.latitude, 12.9356);
        assert_eq!(location.longitude, 77.6192);
        assert_eq!(location.description.as_deref(), Some("Main campus library"));
    }

    #[tokio::test]
    async fn test_create_endpoint_assigns_fresh_ids() {
        let app = setup_test_app();

        let mut ids = Vec::new();
        for body in [
            serde_json::json!({"id": 42, "name": "Canteen", "latitude": 12.9, "longitude": 77.6}),
            serde_json::json!({"id": 42, "name": "Canteen", "latitude": 12.9, "longitude": 77.6}),
        ] {
            let response = app
                .clone()
                .oneshot(post(serde_json::to_string(&body).unwrap()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let location: Location = serde_json::from_slice(&body).unwrap();
            assert_eq!(location.description, None);
            ids.push(location.id);
        }

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_create_endpoint_invalid_json() {
        let app = setup_test_app();

        let response = app.oneshot(post("{invalid json}")).await.unwrap();

        // Axum's Json extractor returns 400 for syntactically invalid JSON
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_endpoint_missing_coordinates_default_to_zero() {
        let app = setup_test_app();

        for body in [
            r#"{"name": "Library"}"#,
            r#"{"name": "Library", "latitude": null, "longitude": null}"#,
        ] {
            let response = app.clone().oneshot(post(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let location: Location = serde_json::from_slice(&body).unwrap();
            assert_eq!(location.name, "Library");
            assert_eq!(location.latitude, 0.0);
            assert_eq!(location.longitude, 0.0);
        }
    }

    #[tokio::test]
    async fn test_create_endpoint_missing_name() {
        let app = setup_test_app();

        let response = app
            .oneshot(post(r#"{"latitude": 12.9, "longitude": 77.6}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
