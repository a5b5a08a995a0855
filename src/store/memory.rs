use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::LocationStore;
use crate::models::{Location, NewLocation};

#[derive(Default)]
struct Table {
    rows: Vec<Location>,
    last_id: i64,
}

/// In-process location table
///
/// Rows are kept in insertion order, which is also ascending id order.
#[derive(Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Location>> {
        let table = self.table.read().await;
        tracing::debug!("Listed {} locations", table.rows.len());
        Ok(table.rows.clone())
    }

    async fn create(&self, candidate: NewLocation) -> Result<Location> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let location = Location::from_new(table.last_id, candidate);
        table.rows.push(location.clone());

        tracing::debug!("Created location with id: {}", location.id);
        Ok(location)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Location>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.name == name).cloned())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str) -> NewLocation {
        NewLocation {
            name: name.to_string(),
            latitude: 12.9,
            longitude: 77.6,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let store = MemoryStore::new();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryStore::new();

        let first = store.create(candidate("Library")).await.unwrap();
        let second = store.create(candidate("Canteen")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let store = MemoryStore::new();
        store.create(candidate("Library")).await.unwrap();

        assert!(store.find_by_name("Library").await.unwrap().is_some());
        assert!(store.find_by_name("library").await.unwrap().is_none());
        assert!(store.find_by_name("Library ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_duplicate_returns_lowest_id() {
        let store = MemoryStore::new();
        let first = store.create(candidate("Gate")).await.unwrap();
        store.create(candidate("Gate")).await.unwrap();

        let found = store.find_by_name("Gate").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(candidate(&format!("p{}", i))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 32);
        assert_eq!(store.list_all().await.unwrap().len(), 32);
    }
}
