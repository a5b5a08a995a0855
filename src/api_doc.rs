use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{Location, NewLocation};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "campus-navigation API",
        version = "1.0.0",
        description = "Named campus locations with a placeholder route lookup"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::create::create_handler,
        handlers::route::route_handler
    ),
    components(
        schemas(
            Location,
            NewLocation,
            ErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "locations", description = "Location storage and route lookup")
    )
)]
pub struct ApiDoc;
