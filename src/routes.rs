// Route path constants - single source of truth for all API paths

pub const LOCATIONS: &str = "/api/locations";
pub const ROUTE: &str = "/api/locations/route";
pub const HEALTH: &str = "/api/locations/health";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
