//! # In-Memory Exclusion Repository
//!
//! In-memory implementation of [`ExclusionRepository`] for testing.

use crate::domain::entities::{ExclusionSet, ResponseTimeExclusion, ServiceExclusion};
use crate::domain::value_objects::SupplierId;
use crate::infrastructure::persistence::traits::{ExclusionRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ExclusionRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryExclusionRepository {
    service: Arc<RwLock<HashSet<ServiceExclusion>>>,
    response: Arc<RwLock<HashSet<ResponseTimeExclusion>>>,
}

impl InMemoryExclusionRepository {
    /// Creates a new empty in-memory exclusion repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExclusionRepository for InMemoryExclusionRepository {
    async fn add_service_exclusion(&self, exclusion: &ServiceExclusion) -> RepositoryResult<()> {
        let mut service = self.service.write().await;
        service.insert(exclusion.clone());
        Ok(())
    }

    async fn remove_service_exclusion(
        &self,
        exclusion: &ServiceExclusion,
    ) -> RepositoryResult<bool> {
        let mut service = self.service.write().await;
        Ok(service.remove(exclusion))
    }

    async fn add_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> RepositoryResult<()> {
        let mut response = self.response.write().await;
        response.insert(exclusion.clone());
        Ok(())
    }

    async fn remove_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> RepositoryResult<bool> {
        let mut response = self.response.write().await;
        Ok(response.remove(exclusion))
    }

    async fn exclusions_for(&self, supplier_id: &SupplierId) -> RepositoryResult<ExclusionSet> {
        let service = self.service.read().await;
        let response = self.response.read().await;
        Ok(ExclusionSet::from_records(
            service
                .iter()
                .filter(|e| e.supplier_id() == supplier_id)
                .cloned(),
            response
                .iter()
                .filter(|e| e.supplier_id() == supplier_id)
                .cloned(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{
        CountryCode, LocationScope, ServiceLevel, ServiceType,
    };

    fn scope() -> LocationScope {
        LocationScope::country_wide(CountryCode::new("US").unwrap())
    }

    #[tokio::test]
    async fn add_and_remove_service_exclusion() {
        let repo = InMemoryExclusionRepository::new();
        let exclusion = ServiceExclusion::new(
            SupplierId::new("sup-1"),
            scope(),
            ServiceType::NetworkSupport,
        );

        repo.add_service_exclusion(&exclusion).await.unwrap();
        let set = repo.exclusions_for(&SupplierId::new("sup-1")).await.unwrap();
        assert!(set.is_service_excluded(&scope(), ServiceType::NetworkSupport));

        assert!(repo.remove_service_exclusion(&exclusion).await.unwrap());
        assert!(!repo.remove_service_exclusion(&exclusion).await.unwrap());
    }

    #[tokio::test]
    async fn snapshot_is_supplier_scoped() {
        let repo = InMemoryExclusionRepository::new();
        repo.add_response_exclusion(&ResponseTimeExclusion::new(
            SupplierId::new("sup-1"),
            scope(),
            ServiceType::SmartHands,
            ServiceLevel::Scheduled,
        ))
        .await
        .unwrap();

        let other = repo.exclusions_for(&SupplierId::new("sup-2")).await.unwrap();
        assert!(other.is_empty());

        let own = repo.exclusions_for(&SupplierId::new("sup-1")).await.unwrap();
        assert!(own.is_excluded(&scope(), ServiceType::SmartHands, ServiceLevel::Scheduled));
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let repo = InMemoryExclusionRepository::new();
        let exclusion = ServiceExclusion::new(
            SupplierId::new("sup-1"),
            scope(),
            ServiceType::EndUserCompute,
        );
        repo.add_service_exclusion(&exclusion).await.unwrap();
        repo.add_service_exclusion(&exclusion).await.unwrap();

        assert!(repo.remove_service_exclusion(&exclusion).await.unwrap());
        let set = repo.exclusions_for(&SupplierId::new("sup-1")).await.unwrap();
        assert!(set.is_empty());
    }
}
