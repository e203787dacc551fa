//! # In-Memory Supplier Repository
//!
//! In-memory implementation of [`SupplierRepository`] for testing.

use crate::domain::entities::Supplier;
use crate::domain::value_objects::SupplierId;
use crate::infrastructure::persistence::traits::{RepositoryResult, SupplierRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`SupplierRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySupplierRepository {
    storage: Arc<RwLock<HashMap<SupplierId, Supplier>>>,
}

impl InMemorySupplierRepository {
    /// Creates a new empty in-memory supplier repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn save(&self, supplier: &Supplier) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(supplier.id().clone(), supplier.clone());
        Ok(())
    }

    async fn get(&self, id: &SupplierId) -> RepositoryResult<Option<Supplier>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Supplier>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CountryCode;

    fn supplier(id: &str) -> Supplier {
        Supplier::new(SupplierId::new(id), CountryCode::new("US").unwrap())
    }

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemorySupplierRepository::new();
        repo.save(&supplier("sup-1")).await.unwrap();

        let found = repo.get(&SupplierId::new("sup-1")).await.unwrap();
        assert!(found.is_some());
        assert!(repo.get(&SupplierId::new("sup-2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_by_id() {
        let repo = InMemorySupplierRepository::new();
        repo.save(&supplier("sup-1")).await.unwrap();
        repo.save(&supplier("sup-1").with_out_of_hours(true))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let stored = repo.get(&SupplierId::new("sup-1")).await.unwrap().unwrap();
        assert!(stored.offers_out_of_hours());
    }

    #[tokio::test]
    async fn get_all() {
        let repo = InMemorySupplierRepository::new();
        repo.save(&supplier("sup-1")).await.unwrap();
        repo.save(&supplier("sup-2")).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }
}
