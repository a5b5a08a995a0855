use crate::service::LocationService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: LocationService,
}
