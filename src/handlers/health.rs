use crate::routes;

pub const HEALTH_MESSAGE: &str = "✅ Campus Navigation Backend is running fine!";

/// GET /api/locations/health handler - Liveness check
///
/// Always answers with the same text. Storage is deliberately not probed, so
/// the response is identical whether the table is empty or unreachable.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn health_handler() -> &'static str {
    HEALTH_MESSAGE
}
