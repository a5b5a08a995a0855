use anyhow::Result;

use crate::models::{Location, NewLocation};
use crate::store::DynLocationStore;

/// Returned by [`LocationService::get_route`] when either name is unknown
pub const INVALID_LOCATIONS: &str = "❌ Invalid locations";

/// Placeholder route text between two stored locations
pub fn route_description(start: &Location, end: &Location) -> String {
    format!("Dummy route from {} → {} 🗺️", start.name, end.name)
}

/// Business rules between the HTTP surface and the store
#[derive(Clone)]
pub struct LocationService {
    store: DynLocationStore,
}

impl LocationService {
    pub fn new(store: DynLocationStore) -> Self {
        Self { store }
    }

    pub async fn get_all_locations(&self) -> Result<Vec<Location>> {
        self.store.list_all().await
    }

    /// Store a new location as given
    ///
    /// No validation is applied: empty names, out-of-range coordinates and
    /// duplicate names are all persisted.
    pub async fn add_location(&self, candidate: NewLocation) -> Result<Location> {
        self.store.create(candidate).await
    }

    /// Describe a route between two locations by exact name
    ///
    /// Unknown names are not an error; they yield [`INVALID_LOCATIONS`].
    /// No path is computed, so the result never depends on coordinates.
    pub async fn get_route(&self, start: &str, end: &str) -> Result<String> {
        let from = self.store.find_by_name(start).await?;
        let to = self.store.find_by_name(end).await?;

        match (from, to) {
            (Some(from), Some(to)) => Ok(route_description(&from, &to)),
            _ => {
                tracing::debug!("Route requested between unknown locations: {:?} -> {:?}", start, end);
                Ok(INVALID_LOCATIONS.to_string())
            }
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        self.store.health_check().await
    }
}
