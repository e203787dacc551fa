//! # In-Memory Coverage Repository
//!
//! In-memory implementation of [`CoverageRepository`] for testing.

use crate::domain::entities::{CoverageCountry, PriorityCity};
use crate::domain::value_objects::{CityId, CountryCode, SupplierId};
use crate::infrastructure::persistence::traits::{CoverageRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`CoverageRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCoverageRepository {
    countries: Arc<RwLock<HashSet<CoverageCountry>>>,
    cities: Arc<RwLock<HashSet<PriorityCity>>>,
}

impl InMemoryCoverageRepository {
    /// Creates a new empty in-memory coverage repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoverageRepository for InMemoryCoverageRepository {
    async fn add_country(&self, coverage: &CoverageCountry) -> RepositoryResult<()> {
        let mut countries = self.countries.write().await;
        countries.insert(coverage.clone());
        Ok(())
    }

    async fn add_city(&self, city: &PriorityCity) -> RepositoryResult<()> {
        let mut cities = self.cities.write().await;
        cities.insert(city.clone());
        Ok(())
    }

    async fn countries_for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> RepositoryResult<Vec<CoverageCountry>> {
        let countries = self.countries.read().await;
        Ok(countries
            .iter()
            .filter(|c| c.supplier_id() == supplier_id)
            .cloned()
            .collect())
    }

    async fn cities_for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> RepositoryResult<Vec<PriorityCity>> {
        let cities = self.cities.read().await;
        Ok(cities
            .iter()
            .filter(|c| c.supplier_id() == supplier_id)
            .cloned()
            .collect())
    }

    async fn suppliers_covering(
        &self,
        country: &CountryCode,
    ) -> RepositoryResult<Vec<SupplierId>> {
        let countries = self.countries.read().await;
        let mut suppliers: Vec<SupplierId> = countries
            .iter()
            .filter(|c| c.country() == country)
            .map(|c| c.supplier_id().clone())
            .collect();
        // Deterministic order for reproducible quotes and tests.
        suppliers.sort();
        suppliers.dedup();
        Ok(suppliers)
    }

    async fn has_priority_city(
        &self,
        supplier_id: &SupplierId,
        city_id: &CityId,
    ) -> RepositoryResult<bool> {
        let cities = self.cities.read().await;
        Ok(cities
            .iter()
            .any(|c| c.supplier_id() == supplier_id && c.city_id() == city_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn us() -> CountryCode {
        CountryCode::new("US").unwrap()
    }

    #[tokio::test]
    async fn suppliers_covering_matches_country_only() {
        let repo = InMemoryCoverageRepository::new();
        repo.add_country(&CoverageCountry::new(SupplierId::new("sup-1"), us()))
            .await
            .unwrap();
        repo.add_country(&CoverageCountry::new(
            SupplierId::new("sup-2"),
            CountryCode::new("GB").unwrap(),
        ))
        .await
        .unwrap();

        let covering = repo.suppliers_covering(&us()).await.unwrap();
        assert_eq!(covering, vec![SupplierId::new("sup-1")]);
    }

    #[tokio::test]
    async fn add_country_is_idempotent() {
        let repo = InMemoryCoverageRepository::new();
        let record = CoverageCountry::new(SupplierId::new("sup-1"), us());
        repo.add_country(&record).await.unwrap();
        repo.add_country(&record).await.unwrap();

        assert_eq!(repo.suppliers_covering(&us()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn has_priority_city() {
        let repo = InMemoryCoverageRepository::new();
        repo.add_city(&PriorityCity::new(
            SupplierId::new("sup-1"),
            CityId::new("nyc"),
            us(),
        ))
        .await
        .unwrap();

        assert!(repo
            .has_priority_city(&SupplierId::new("sup-1"), &CityId::new("nyc"))
            .await
            .unwrap());
        assert!(!repo
            .has_priority_city(&SupplierId::new("sup-2"), &CityId::new("nyc"))
            .await
            .unwrap());
        assert!(!repo
            .has_priority_city(&SupplierId::new("sup-1"), &CityId::new("lon"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn per_supplier_listings() {
        let repo = InMemoryCoverageRepository::new();
        repo.add_country(&CoverageCountry::new(SupplierId::new("sup-1"), us()))
            .await
            .unwrap();
        repo.add_city(&PriorityCity::new(
            SupplierId::new("sup-1"),
            CityId::new("nyc"),
            us(),
        ))
        .await
        .unwrap();

        let sup1 = SupplierId::new("sup-1");
        assert_eq!(repo.countries_for_supplier(&sup1).await.unwrap().len(), 1);
        assert_eq!(repo.cities_for_supplier(&sup1).await.unwrap().len(), 1);
    }
}
