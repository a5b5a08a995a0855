//! Persistence for location records.
//!
//! Two backends implement [`LocationStore`]: [`SpannerStore`] for Cloud
//! Spanner (production or emulator) and [`MemoryStore`] for local runs and
//! tests. Both assign ids themselves and resolve duplicate names to the
//! record with the lowest id.

mod memory;
mod spanner;

pub use memory::MemoryStore;
pub use spanner::SpannerStore;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::models::{Location, NewLocation};

#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Every stored location, empty when none exist
    async fn list_all(&self) -> Result<Vec<Location>>;

    /// Persist a new location under a freshly assigned id
    async fn create(&self, candidate: NewLocation) -> Result<Location>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>>;

    /// Verify the backing medium is reachable
    async fn health_check(&self) -> Result<()>;
}

pub type DynLocationStore = Arc<dyn LocationStore>;

/// Open the backend selected by `config.store`
pub async fn from_config(config: &Config) -> Result<DynLocationStore> {
    match (config.store, &config.spanner) {
        (StoreBackend::Spanner, Some(spanner)) => {
            let store: DynLocationStore = Arc::new(SpannerStore::from_config(spanner).await?);
            Ok(store)
        }
        (StoreBackend::Spanner, None) => {
            Err(anyhow::anyhow!("spanner store selected without spanner settings"))
        }
        (StoreBackend::Memory, _) => {
            tracing::info!("Using in-memory location store");
            let store: DynLocationStore = Arc::new(MemoryStore::new());
            Ok(store)
        }
    }
}
