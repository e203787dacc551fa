//! # In-Memory Rate Repository
//!
//! In-memory implementation of [`RateRepository`] for testing.
//!
//! This implementation uses a thread-safe `HashMap` keyed by the rate's
//! natural key. The upsert takes the write lock once and performs the
//! insert-or-update under it, so concurrent upserts on the same key
//! cannot interleave.

use crate::domain::entities::{Rate, RateKey};
use crate::domain::value_objects::{ServiceLevel, ServiceType, SupplierId, UsdCents};
use crate::infrastructure::persistence::traits::{
    RateRepository, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`RateRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateRepository {
    storage: Arc<RwLock<HashMap<RateKey, Rate>>>,
}

impl InMemoryRateRepository {
    /// Creates a new empty in-memory rate repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all rates from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl RateRepository for InMemoryRateRepository {
    async fn upsert(&self, key: &RateKey, amount: Option<UsdCents>) -> RepositoryResult<Rate> {
        let mut storage = self.storage.write().await;
        let rate = storage
            .entry(key.clone())
            .and_modify(|existing| existing.set_amount(amount))
            .or_insert_with(|| Rate::new(key.clone(), amount));
        Ok(rate.clone())
    }

    async fn get(&self, key: &RateKey) -> RepositoryResult<Option<Rate>> {
        let storage = self.storage.read().await;
        Ok(storage.get(key).cloned())
    }

    async fn find_by_supplier(&self, supplier_id: &SupplierId) -> RepositoryResult<Vec<Rate>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|r| &r.key().supplier_id == supplier_id)
            .cloned()
            .collect())
    }

    async fn find_for_service(
        &self,
        service_type: ServiceType,
        service_level: ServiceLevel,
    ) -> RepositoryResult<Vec<Rate>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|r| {
                r.key().service_type == service_type && r.key().service_level == service_level
            })
            .cloned()
            .collect())
    }

    async fn set_amount(&self, key: &RateKey, amount: UsdCents) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        match storage.get_mut(key) {
            Some(rate) => {
                rate.set_amount(Some(amount));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_serviceable(&self, key: &RateKey, serviceable: bool) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        match storage.get_mut(key) {
            Some(rate) => {
                rate.set_serviceable(serviceable);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, key: &RateKey) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(key).is_some())
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
    use crate::domain::value_objects::{CityId, CountryCode, LocationScope};

    fn key(supplier: &str, level: ServiceLevel) -> RateKey {
        RateKey::new(
            SupplierId::new(supplier),
            LocationScope::city(CityId::new("nyc"), CountryCode::new("US").unwrap()),
            ServiceType::EndUserCompute,
            level,
        )
    }

    #[tokio::test]
    async fn upsert_inserts_then_updates_in_place() {
        let repo = InMemoryRateRepository::new();
        let key = key("sup-1", ServiceLevel::SameBusinessDay);

        let created = repo
            .upsert(&key, Some(UsdCents::from_dollars(100).unwrap()))
            .await
            .unwrap();
        assert_eq!(created.version(), 0);

        let updated = repo
            .upsert(&key, Some(UsdCents::from_dollars(110).unwrap()))
            .await
            .unwrap();
        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.version(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let repo = InMemoryRateRepository::new();
        let result = repo.get(&key("sup-1", ServiceLevel::Scheduled)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn find_by_supplier_filters_others() {
        let repo = InMemoryRateRepository::new();
        repo.upsert(&key("sup-1", ServiceLevel::SameBusinessDay), None)
            .await
            .unwrap();
        repo.upsert(&key("sup-1", ServiceLevel::Scheduled), None)
            .await
            .unwrap();
        repo.upsert(&key("sup-2", ServiceLevel::Scheduled), None)
            .await
            .unwrap();

        let found = repo
            .find_by_supplier(&SupplierId::new("sup-1"))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn find_for_service_spans_suppliers() {
        let repo = InMemoryRateRepository::new();
        repo.upsert(&key("sup-1", ServiceLevel::Scheduled), None)
            .await
            .unwrap();
        repo.upsert(&key("sup-2", ServiceLevel::Scheduled), None)
            .await
            .unwrap();
        repo.upsert(&key("sup-2", ServiceLevel::SameBusinessDay), None)
            .await
            .unwrap();

        let found = repo
            .find_for_service(ServiceType::EndUserCompute, ServiceLevel::Scheduled)
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn set_amount_on_missing_key_returns_false() {
        let repo = InMemoryRateRepository::new();
        let changed = repo
            .set_amount(
                &key("sup-1", ServiceLevel::Scheduled),
                UsdCents::from_dollars(10).unwrap(),
            )
            .await
            .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn set_serviceable_round_trip() {
        let repo = InMemoryRateRepository::new();
        let key = key("sup-1", ServiceLevel::Scheduled);
        repo.upsert(&key, Some(UsdCents::from_dollars(60).unwrap()))
            .await
            .unwrap();

        assert!(repo.set_serviceable(&key, false).await.unwrap());
        let stored = repo.get(&key).await.unwrap().unwrap();
        assert!(!stored.serviceable());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = InMemoryRateRepository::new();
        let key = key("sup-1", ServiceLevel::Scheduled);
        repo.upsert(&key, None).await.unwrap();

        assert!(repo.delete(&key).await.unwrap());
        assert!(!repo.delete(&key).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
