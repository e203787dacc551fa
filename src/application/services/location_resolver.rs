//! # Location Resolver
//!
//! Resolves the effective rate per supplier for a job location.
//!
//! Rate resolution is per supplier: when the supplier declares the target
//! city as a priority city, a usable city-specific rate wins over the
//! supplier's country-wide rate for the same slot; otherwise the
//! country-wide rate applies even if a city-scoped row exists. Suppliers
//! without a usable rate at either scope contribute no candidate but
//! still count toward coverage, which the availability layer uses to tell
//! "nobody here" apart from "nobody prices this service here".

use crate::application::error::ApplicationResult;
use crate::domain::entities::{Rate, RateKey};
use crate::domain::value_objects::{
    CityId, CountryCode, LocationScope, ServiceLevel, ServiceType, SupplierId,
};
use crate::infrastructure::persistence::traits::{CoverageRepository, RateRepository};
use std::sync::Arc;

/// A supplier's effective rate for one job location and slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRate {
    /// The supplier offering the rate.
    pub supplier_id: SupplierId,
    /// The winning rate record (city over country).
    pub rate: Rate,
}

/// Result of resolving rates for a job location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Per-supplier effective rates, in supplier order.
    pub candidates: Vec<ResolvedRate>,
    /// Number of suppliers declaring coverage of the country.
    pub covering_suppliers: usize,
    /// True if any covering supplier prices the service type at any tier
    /// in this location, regardless of the requested tier.
    pub has_service_rates: bool,
}

/// Resolves effective per-supplier rates for a location and service slot.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    rates: Arc<dyn RateRepository>,
    coverage: Arc<dyn CoverageRepository>,
}

impl LocationResolver {
    /// Creates a resolver over the given repositories.
    #[must_use]
    pub fn new(rates: Arc<dyn RateRepository>, coverage: Arc<dyn CoverageRepository>) -> Self {
        Self { rates, coverage }
    }

    /// Resolves the effective rate for every supplier covering the country.
    ///
    /// # Errors
    ///
    /// Returns an error when a repository read fails.
    pub async fn resolve(
        &self,
        city_id: &CityId,
        country: &CountryCode,
        service_type: ServiceType,
        service_level: ServiceLevel,
    ) -> ApplicationResult<ResolutionOutcome> {
        let suppliers = self.coverage.suppliers_covering(country).await?;
        let covering_suppliers = suppliers.len();

        let city_scope = LocationScope::city(city_id.clone(), country.clone());
        let country_scope = LocationScope::country_wide(country.clone());

        let mut candidates = Vec::new();
        let mut has_service_rates = false;

        for supplier_id in suppliers {
            if let Some(rate) = self
                .effective_rate(
                    &supplier_id,
                    city_id,
                    &city_scope,
                    &country_scope,
                    service_type,
                    service_level,
                )
                .await?
            {
                candidates.push(ResolvedRate { supplier_id: supplier_id.clone(), rate });
                has_service_rates = true;
                continue;
            }

            if !has_service_rates
                && self
                    .prices_service_anywhere(&supplier_id, &city_scope, &country_scope, service_type)
                    .await?
            {
                has_service_rates = true;
            }
        }

        Ok(ResolutionOutcome {
            candidates,
            covering_suppliers,
            has_service_rates,
        })
    }

    /// City rate wins when the city is a declared priority city and the
    /// rate is usable; otherwise fall back to the country rate.
    async fn effective_rate(
        &self,
        supplier_id: &SupplierId,
        city_id: &CityId,
        city_scope: &LocationScope,
        country_scope: &LocationScope,
        service_type: ServiceType,
        service_level: ServiceLevel,
    ) -> ApplicationResult<Option<Rate>> {
        if self.coverage.has_priority_city(supplier_id, city_id).await? {
            let city_key = RateKey::new(
                supplier_id.clone(),
                city_scope.clone(),
                service_type,
                service_level,
            );
            if let Some(rate) = self.rates.get(&city_key).await? {
                if rate.is_usable() {
                    return Ok(Some(rate));
                }
            }
        }

        let country_key = RateKey::new(
            supplier_id.clone(),
            country_scope.clone(),
            service_type,
            service_level,
        );
        match self.rates.get(&country_key).await? {
            Some(rate) if rate.is_usable() => Ok(Some(rate)),
            _ => Ok(None),
        }
    }

    /// True if the supplier has any priced slot for the service type at
    /// either scope of this location, at any tier.
    async fn prices_service_anywhere(
        &self,
        supplier_id: &SupplierId,
        city_scope: &LocationScope,
        country_scope: &LocationScope,
        service_type: ServiceType,
    ) -> ApplicationResult<bool> {
        let rates = self.rates.find_by_supplier(supplier_id).await?;
        Ok(rates.iter().any(|r| {
            r.key().service_type == service_type
                && r.is_configured()
                && (r.key().scope == *city_scope || r.key().scope == *country_scope)
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::UsdCents;
    use crate::infrastructure::persistence::in_memory::{
        InMemoryCoverageRepository, InMemoryRateRepository,
    };
    use crate::domain::entities::{CoverageCountry, PriorityCity};

    fn us() -> CountryCode {
        CountryCode::new("US").unwrap()
    }

    fn nyc() -> CityId {
        CityId::new("nyc")
    }

    struct Fixture {
        rates: Arc<InMemoryRateRepository>,
        resolver: LocationResolver,
        coverage: Arc<InMemoryCoverageRepository>,
    }

    fn fixture() -> Fixture {
        let rates = Arc::new(InMemoryRateRepository::new());
        let coverage = Arc::new(InMemoryCoverageRepository::new());
        let resolver = LocationResolver::new(rates.clone(), coverage.clone());
        Fixture {
            rates,
            resolver,
            coverage,
        }
    }

    async fn cover(fixture: &Fixture, supplier: &str) {
        fixture
            .coverage
            .add_country(&CoverageCountry::new(SupplierId::new(supplier), us()))
            .await
            .unwrap();
    }

    async fn prioritize(fixture: &Fixture, supplier: &str) {
        fixture
            .coverage
            .add_city(&PriorityCity::new(SupplierId::new(supplier), nyc(), us()))
            .await
            .unwrap();
    }

    async fn put_rate(fixture: &Fixture, supplier: &str, scope: LocationScope, dollars: i64) {
        fixture
            .rates
            .upsert(
                &RateKey::new(
                    SupplierId::new(supplier),
                    scope,
                    ServiceType::EndUserCompute,
                    ServiceLevel::SameBusinessDay,
                ),
                Some(UsdCents::from_dollars(dollars).unwrap()),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn city_rate_wins_over_country_rate() {
        let f = fixture();
        cover(&f, "sup-1").await;
        prioritize(&f, "sup-1").await;
        put_rate(&f, "sup-1", LocationScope::country_wide(us()), 80).await;
        put_rate(&f, "sup-1", LocationScope::city(nyc(), us()), 100).await;

        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(
            outcome.candidates[0].rate.amount().unwrap().cents(),
            10000
        );
    }

    #[tokio::test]
    async fn country_rate_fills_in_when_city_missing() {
        let f = fixture();
        cover(&f, "sup-1").await;
        put_rate(&f, "sup-1", LocationScope::country_wide(us()), 80).await;

        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].rate.amount().unwrap().cents(), 8000);
    }

    #[tokio::test]
    async fn unusable_city_rate_falls_back_to_country() {
        let f = fixture();
        cover(&f, "sup-1").await;
        prioritize(&f, "sup-1").await;
        put_rate(&f, "sup-1", LocationScope::country_wide(us()), 80).await;
        put_rate(&f, "sup-1", LocationScope::city(nyc(), us()), 100).await;
        f.rates
            .set_serviceable(
                &RateKey::new(
                    SupplierId::new("sup-1"),
                    LocationScope::city(nyc(), us()),
                    ServiceType::EndUserCompute,
                    ServiceLevel::SameBusinessDay,
                ),
                false,
            )
            .await
            .unwrap();

        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].rate.amount().unwrap().cents(), 8000);
    }

    #[tokio::test]
    async fn city_rate_without_priority_declaration_is_ignored() {
        let f = fixture();
        cover(&f, "sup-1").await;
        put_rate(&f, "sup-1", LocationScope::city(nyc(), us()), 100).await;

        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.covering_suppliers, 1);
    }

    #[tokio::test]
    async fn country_rate_applies_when_city_is_not_prioritized() {
        let f = fixture();
        cover(&f, "sup-1").await;
        put_rate(&f, "sup-1", LocationScope::country_wide(us()), 80).await;
        put_rate(&f, "sup-1", LocationScope::city(nyc(), us()), 100).await;

        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].rate.amount().unwrap().cents(), 8000);
    }

    #[tokio::test]
    async fn no_coverage_yields_empty_outcome() {
        let f = fixture();
        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.covering_suppliers, 0);
        assert!(!outcome.has_service_rates);
    }

    #[tokio::test]
    async fn other_tier_rates_still_signal_service_presence() {
        let f = fixture();
        cover(&f, "sup-1").await;
        f.rates
            .upsert(
                &RateKey::new(
                    SupplierId::new("sup-1"),
                    LocationScope::country_wide(us()),
                    ServiceType::EndUserCompute,
                    ServiceLevel::Scheduled,
                ),
                Some(UsdCents::from_dollars(70).unwrap()),
            )
            .await
            .unwrap();

        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.covering_suppliers, 1);
        assert!(outcome.has_service_rates);
    }

    #[tokio::test]
    async fn price_gap_does_not_signal_service_presence() {
        let f = fixture();
        cover(&f, "sup-1").await;
        f.rates
            .upsert(
                &RateKey::new(
                    SupplierId::new("sup-1"),
                    LocationScope::country_wide(us()),
                    ServiceType::EndUserCompute,
                    ServiceLevel::SameBusinessDay,
                ),
                None,
            )
            .await
            .unwrap();

        let outcome = f
            .resolver
            .resolve(
                &nyc(),
                &us(),
                ServiceType::EndUserCompute,
                ServiceLevel::SameBusinessDay,
            )
            .await
            .unwrap();

        assert!(outcome.candidates.is_empty());
        assert!(!outcome.has_service_rates);
    }
}
