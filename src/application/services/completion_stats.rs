//! # Completion Stats Calculator
//!
//! Rate card completion accounting for one supplier.
//!
//! The slot universe is every `(location, service type, service level)`
//! combination over the supplier's covered countries and priority cities.
//! Exclusions remove slots from the denominator entirely; a slot is never
//! both excluded and missing. Configured counts non-null amounts among
//! the remaining slots, whatever their cached serviceable flag says.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::value_objects::{
    LocationScope, LocationType, ServiceLevel, ServiceType, SupplierId,
};
use crate::infrastructure::persistence::traits::{
    CoverageRepository, ExclusionRepository, RateRepository, SupplierRepository,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Completion counts for one service type across all locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypeStats {
    /// The service type this row covers.
    pub service_type: ServiceType,
    /// Non-excluded slots with a configured amount.
    pub configured: u64,
    /// Non-excluded slots without an amount.
    pub missing: u64,
    /// Non-excluded slots.
    pub total: u64,
}

/// Completion counts for one location kind across all service slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTypeStats {
    /// Countries or cities.
    pub location_type: LocationType,
    /// Non-excluded slots with a configured amount.
    pub configured: u64,
    /// Non-excluded slots without an amount.
    pub missing: u64,
    /// Non-excluded slots.
    pub total: u64,
}

/// A supplier's rate card completion summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    /// Non-excluded slots.
    pub total: u64,
    /// Slots with a configured amount.
    pub configured: u64,
    /// Slots still waiting for an amount.
    pub missing: u64,
    /// Slots removed from the denominator by exclusions.
    pub excluded: u64,
    /// `configured / total` in percent, one decimal place, 0 when empty.
    pub percentage: Decimal,
    /// Per service type breakdown.
    pub by_service_type: Vec<ServiceTypeStats>,
    /// Per location kind breakdown.
    pub by_location_type: Vec<LocationTypeStats>,
}

/// Computes completion stats over the coverage and rate repositories.
#[derive(Debug, Clone)]
pub struct CompletionStatsService {
    rates: Arc<dyn RateRepository>,
    suppliers: Arc<dyn SupplierRepository>,
    coverage: Arc<dyn CoverageRepository>,
    exclusions: Arc<dyn ExclusionRepository>,
}

impl CompletionStatsService {
    /// Creates a completion stats service.
    #[must_use]
    pub fn new(
        rates: Arc<dyn RateRepository>,
        suppliers: Arc<dyn SupplierRepository>,
        coverage: Arc<dyn CoverageRepository>,
        exclusions: Arc<dyn ExclusionRepository>,
    ) -> Self {
        Self {
            rates,
            suppliers,
            coverage,
            exclusions,
        }
    }

    /// Computes the completion summary for a supplier.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` for unknown suppliers and a
    /// repository error on storage failure.
    pub async fn for_supplier(&self, supplier_id: &SupplierId) -> ApplicationResult<CompletionStats> {
        if self.suppliers.get(supplier_id).await?.is_none() {
            return Err(ApplicationError::not_found(
                "Supplier",
                supplier_id.as_str(),
            ));
        }

        let locations = self.locations(supplier_id).await?;
        let exclusions = self.exclusions.exclusions_for(supplier_id).await?;
        let configured_slots = self.configured_slots(supplier_id).await?;

        let mut totals = Counts::default();
        let mut excluded = 0u64;
        let mut by_type: Vec<(ServiceType, Counts)> = ServiceType::ALL
            .into_iter()
            .map(|t| (t, Counts::default()))
            .collect();
        let mut by_location: Vec<(LocationType, Counts)> =
            vec![(LocationType::Country, Counts::default()), (LocationType::City, Counts::default())];

        for scope in &locations {
            for service_type in ServiceType::ALL {
                for service_level in ServiceLevel::ALL {
                    if exclusions.is_excluded(scope, service_type, service_level) {
                        excluded += 1;
                        continue;
                    }
                    let configured = configured_slots.contains(&(
                        scope.clone(),
                        service_type,
                        service_level,
                    ));
                    totals.record(configured);
                    if let Some((_, counts)) =
                        by_type.iter_mut().find(|(t, _)| *t == service_type)
                    {
                        counts.record(configured);
                    }
                    if let Some((_, counts)) = by_location
                        .iter_mut()
                        .find(|(l, _)| *l == scope.location_type())
                    {
                        counts.record(configured);
                    }
                }
            }
        }

        Ok(CompletionStats {
            total: totals.total,
            configured: totals.configured,
            missing: totals.missing(),
            excluded,
            percentage: totals.percentage(),
            by_service_type: by_type
                .into_iter()
                .map(|(service_type, c)| ServiceTypeStats {
                    service_type,
                    configured: c.configured,
                    missing: c.missing(),
                    total: c.total,
                })
                .collect(),
            by_location_type: by_location
                .into_iter()
                .map(|(location_type, c)| LocationTypeStats {
                    location_type,
                    configured: c.configured,
                    missing: c.missing(),
                    total: c.total,
                })
                .collect(),
        })
    }

    /// Covered countries and priority cities, each a distinct location.
    async fn locations(&self, supplier_id: &SupplierId) -> ApplicationResult<Vec<LocationScope>> {
        let mut locations: Vec<LocationScope> = self
            .coverage
            .countries_for_supplier(supplier_id)
            .await?
            .into_iter()
            .map(|c| LocationScope::country_wide(c.country().clone()))
            .collect();
        locations.extend(
            self.coverage
                .cities_for_supplier(supplier_id)
                .await?
                .into_iter()
                .map(|c| LocationScope::city(c.city_id().clone(), c.country().clone())),
        );
        Ok(locations)
    }

    async fn configured_slots(
        &self,
        supplier_id: &SupplierId,
    ) -> ApplicationResult<HashSet<(LocationScope, ServiceType, ServiceLevel)>> {
        Ok(self
            .rates
            .find_by_supplier(supplier_id)
            .await?
            .into_iter()
            .filter(|r| r.is_configured())
            .map(|r| {
                (
                    r.key().scope.clone(),
                    r.key().service_type,
                    r.key().service_level,
                )
            })
            .collect())
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    total: u64,
    configured: u64,
}

impl Counts {
    fn record(&mut self, configured: bool) {
        self.total += 1;
        if configured {
            self.configured += 1;
        }
    }

    fn missing(self) -> u64 {
        self.total - self.configured
    }

    fn percentage(self) -> Decimal {
        if self.total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.configured) / Decimal::from(self.total) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        CoverageCountry, PriorityCity, RateKey, ResponseTimeExclusion, ServiceExclusion, Supplier,
    };
    use crate::domain::value_objects::{CityId, CountryCode, UsdCents};
    use crate::infrastructure::persistence::in_memory::{
        InMemoryCoverageRepository, InMemoryExclusionRepository, InMemoryRateRepository,
        InMemorySupplierRepository,
    };

    struct Fixture {
        rates: Arc<InMemoryRateRepository>,
        suppliers: Arc<InMemorySupplierRepository>,
        coverage: Arc<InMemoryCoverageRepository>,
        exclusions: Arc<InMemoryExclusionRepository>,
        service: CompletionStatsService,
    }

    fn fixture() -> Fixture {
        let rates = Arc::new(InMemoryRateRepository::new());
        let suppliers = Arc::new(InMemorySupplierRepository::new());
        let coverage = Arc::new(InMemoryCoverageRepository::new());
        let exclusions = Arc::new(InMemoryExclusionRepository::new());
        let service = CompletionStatsService::new(
            rates.clone(),
            suppliers.clone(),
            coverage.clone(),
            exclusions.clone(),
        );
        Fixture {
            rates,
            suppliers,
            coverage,
            exclusions,
            service,
        }
    }

    fn sup() -> SupplierId {
        SupplierId::new("sup-1")
    }

    fn us() -> CountryCode {
        CountryCode::new("US").unwrap()
    }

    fn gb() -> CountryCode {
        CountryCode::new("GB").unwrap()
    }

    async fn set_rate(f: &Fixture, scope: LocationScope, t: ServiceType, l: ServiceLevel) {
        f.rates
            .upsert(
                &RateKey::new(sup(), scope, t, l),
                Some(UsdCents::from_dollars(80).unwrap()),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_supplier_is_not_found() {
        let f = fixture();
        let err = f.service.for_supplier(&sup()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_coverage_yields_zero_stats() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(sup(), us()))
            .await
            .unwrap();

        let stats = f.service.for_supplier(&sup()).await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, Decimal::ZERO);
    }

    /// Two countries and one city give 27 slots; one service exclusion
    /// removes 3 and one response-time exclusion removes 1; full rates
    /// for one type in one country plus two levels of another type in
    /// the other country give 5 configured.
    #[tokio::test]
    async fn mixed_card_accounting() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(sup(), us()))
            .await
            .unwrap();
        f.coverage
            .add_country(&CoverageCountry::new(sup(), us()))
            .await
            .unwrap();
        f.coverage
            .add_country(&CoverageCountry::new(sup(), gb()))
            .await
            .unwrap();
        f.coverage
            .add_city(&PriorityCity::new(sup(), CityId::new("nyc"), us()))
            .await
            .unwrap();

        let us_scope = LocationScope::country_wide(us());
        for level in ServiceLevel::ALL {
            set_rate(&f, us_scope.clone(), ServiceType::EndUserCompute, level).await;
        }
        let gb_scope = LocationScope::country_wide(gb());
        set_rate(
            &f,
            gb_scope.clone(),
            ServiceType::NetworkSupport,
            ServiceLevel::SameBusinessDay,
        )
        .await;
        set_rate(
            &f,
            gb_scope.clone(),
            ServiceType::NetworkSupport,
            ServiceLevel::NextBusinessDay,
        )
        .await;

        f.exclusions
            .add_service_exclusion(&ServiceExclusion::new(
                sup(),
                gb_scope.clone(),
                ServiceType::SmartHands,
            ))
            .await
            .unwrap();
        f.exclusions
            .add_response_exclusion(&ResponseTimeExclusion::new(
                sup(),
                us_scope,
                ServiceType::SmartHands,
                ServiceLevel::Scheduled,
            ))
            .await
            .unwrap();

        let stats = f.service.for_supplier(&sup()).await.unwrap();
        assert_eq!(stats.total, 23);
        assert_eq!(stats.configured, 5);
        assert_eq!(stats.missing, 18);
        assert_eq!(stats.excluded, 4);
        assert_eq!(stats.configured + stats.missing, stats.total);
        // 5 / 23 = 21.739... -> 21.7 at one decimal place.
        assert_eq!(stats.percentage, Decimal::new(217, 1));
    }

    #[tokio::test]
    async fn grouped_breakdowns_partition_the_totals() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(sup(), us()))
            .await
            .unwrap();
        f.coverage
            .add_country(&CoverageCountry::new(sup(), us()))
            .await
            .unwrap();
        f.coverage
            .add_city(&PriorityCity::new(sup(), CityId::new("nyc"), us()))
            .await
            .unwrap();

        set_rate(
            &f,
            LocationScope::city(CityId::new("nyc"), us()),
            ServiceType::EndUserCompute,
            ServiceLevel::Scheduled,
        )
        .await;

        let stats = f.service.for_supplier(&sup()).await.unwrap();
        assert_eq!(stats.total, 18);
        assert_eq!(stats.configured, 1);

        let type_total: u64 = stats.by_service_type.iter().map(|s| s.total).sum();
        let location_total: u64 = stats.by_location_type.iter().map(|s| s.total).sum();
        assert_eq!(type_total, stats.total);
        assert_eq!(location_total, stats.total);

        let eu = stats
            .by_service_type
            .iter()
            .find(|s| s.service_type == ServiceType::EndUserCompute)
            .unwrap();
        assert_eq!(eu.configured, 1);
        assert_eq!(eu.total, 6);

        let cities = stats
            .by_location_type
            .iter()
            .find(|s| s.location_type == LocationType::City)
            .unwrap();
        assert_eq!(cities.total, 9);
        assert_eq!(cities.configured, 1);
    }

    #[tokio::test]
    async fn excluded_slots_never_count_as_missing() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(sup(), us()))
            .await
            .unwrap();
        f.coverage
            .add_country(&CoverageCountry::new(sup(), us()))
            .await
            .unwrap();

        for service_type in ServiceType::ALL {
            f.exclusions
                .add_service_exclusion(&ServiceExclusion::new(
                    sup(),
                    LocationScope::country_wide(us()),
                    service_type,
                ))
                .await
                .unwrap();
        }

        let stats = f.service.for_supplier(&sup()).await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.missing, 0);
        assert_eq!(stats.excluded, 9);
        assert_eq!(stats.percentage, Decimal::ZERO);
    }
}
