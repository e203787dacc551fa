//! # Availability Service
//!
//! Filters resolved rates down to suppliers who can actually take the job.
//!
//! A candidate survives only if the supplier account is active and
//! verified, no exclusion blocks the slot, and for out-of-hours jobs the
//! supplier offers out-of-hours work. When nothing survives the outcome
//! carries a reason describing the dominant gap, so callers can render a
//! useful message instead of a bare empty list.
//!
//! Exclusions are re-checked against their records here even though rate
//! rows carry a cached `serviceable` flag; the records are the source of
//! truth.

use crate::application::error::ApplicationResult;
use crate::application::services::location_resolver::{ResolutionOutcome, ResolvedRate};
use crate::domain::entities::JobRequest;
use crate::domain::services::business_hours;
use crate::domain::value_objects::LocationScope;
use crate::infrastructure::persistence::traits::{ExclusionRepository, SupplierRepository};
use std::sync::Arc;

/// Why no supplier can take a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// No supplier covers the job's country at all.
    NoCoverage,
    /// Suppliers cover the location but none prices this service there.
    NoRatesForService,
    /// Suppliers could price the job, but none works out of hours.
    NoOutOfHoursSuppliers,
}

impl UnavailableReason {
    /// Returns the customer-facing message for this reason.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoCoverage => "no suppliers in this location",
            Self::NoRatesForService => "no suppliers have configured rates for this service",
            Self::NoOutOfHoursSuppliers => {
                "no suppliers offer out-of-hours service in this location"
            }
        }
    }
}

/// Result of the availability filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityOutcome {
    /// At least one supplier can take the job, with their effective rates.
    Serviceable(Vec<ResolvedRate>),
    /// No supplier can take the job.
    Unavailable(UnavailableReason),
}

/// Filters resolved candidates by supplier and exclusion state.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    suppliers: Arc<dyn SupplierRepository>,
    exclusions: Arc<dyn ExclusionRepository>,
}

impl AvailabilityService {
    /// Creates an availability service over the given repositories.
    #[must_use]
    pub fn new(
        suppliers: Arc<dyn SupplierRepository>,
        exclusions: Arc<dyn ExclusionRepository>,
    ) -> Self {
        Self {
            suppliers,
            exclusions,
        }
    }

    /// Narrows resolution candidates to suppliers who can take the job.
    ///
    /// # Errors
    ///
    /// Returns an error on repository failure or when the scheduled local
    /// time does not exist in the site timezone.
    pub async fn available_suppliers(
        &self,
        job: &JobRequest,
        resolution: &ResolutionOutcome,
    ) -> ApplicationResult<AvailabilityOutcome> {
        let is_ooh = business_hours::is_out_of_hours_for(job)?;
        let city_scope = LocationScope::city(job.city_id().clone(), job.country().clone());

        let mut in_hours = Vec::new();
        for candidate in &resolution.candidates {
            let Some(supplier) = self.suppliers.get(&candidate.supplier_id).await? else {
                continue;
            };
            if !supplier.is_serviceable() {
                continue;
            }

            let exclusions = self.exclusions.exclusions_for(&candidate.supplier_id).await?;
            let blocked = exclusions.is_excluded(
                &candidate.rate.key().scope,
                job.service_type(),
                job.service_level(),
            ) || exclusions.is_excluded(&city_scope, job.service_type(), job.service_level());
            if blocked {
                continue;
            }

            in_hours.push((candidate.clone(), supplier.offers_out_of_hours()));
        }

        if in_hours.is_empty() {
            let reason = if resolution.covering_suppliers == 0 {
                UnavailableReason::NoCoverage
            } else if !resolution.has_service_rates {
                UnavailableReason::NoRatesForService
            } else {
                UnavailableReason::NoCoverage
            };
            return Ok(AvailabilityOutcome::Unavailable(reason));
        }

        let available: Vec<ResolvedRate> = in_hours
            .into_iter()
            .filter(|(_, offers_ooh)| !is_ooh || *offers_ooh)
            .map(|(candidate, _)| candidate)
            .collect();

        if available.is_empty() {
            return Ok(AvailabilityOutcome::Unavailable(
                UnavailableReason::NoOutOfHoursSuppliers,
            ));
        }
        Ok(AvailabilityOutcome::Serviceable(available))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::entities::{Rate, RateKey, ServiceExclusion, Supplier};
    use crate::domain::value_objects::{
        CityId, CountryCode, ServiceLevel, ServiceType, SupplierId, UsdCents,
    };
    use crate::infrastructure::persistence::in_memory::{
        InMemoryExclusionRepository, InMemorySupplierRepository,
    };
    use chrono::NaiveDate;

    fn us() -> CountryCode {
        CountryCode::new("US").unwrap()
    }

    fn weekday_job() -> JobRequest {
        JobRequest::new(
            ServiceType::EndUserCompute,
            ServiceLevel::SameBusinessDay,
            240,
            CityId::new("nyc"),
            us(),
            // Wednesday 10:00 local.
            NaiveDate::from_ymd_opt(2024, 6, 12)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            chrono_tz::America::New_York,
        )
        .unwrap()
    }

    fn weekend_job() -> JobRequest {
        JobRequest::new(
            ServiceType::EndUserCompute,
            ServiceLevel::SameBusinessDay,
            240,
            CityId::new("nyc"),
            us(),
            NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            chrono_tz::America::New_York,
        )
        .unwrap()
    }

    fn candidate(supplier: &str, dollars: i64) -> ResolvedRate {
        let key = RateKey::new(
            SupplierId::new(supplier),
            LocationScope::country_wide(us()),
            ServiceType::EndUserCompute,
            ServiceLevel::SameBusinessDay,
        );
        ResolvedRate {
            supplier_id: SupplierId::new(supplier),
            rate: Rate::new(key, Some(UsdCents::from_dollars(dollars).unwrap())),
        }
    }

    fn resolution(candidates: Vec<ResolvedRate>, covering: usize) -> ResolutionOutcome {
        let has_service_rates = !candidates.is_empty();
        ResolutionOutcome {
            candidates,
            covering_suppliers: covering,
            has_service_rates,
        }
    }

    struct Fixture {
        suppliers: Arc<InMemorySupplierRepository>,
        exclusions: Arc<InMemoryExclusionRepository>,
        service: AvailabilityService,
    }

    fn fixture() -> Fixture {
        let suppliers = Arc::new(InMemorySupplierRepository::new());
        let exclusions = Arc::new(InMemoryExclusionRepository::new());
        let service = AvailabilityService::new(suppliers.clone(), exclusions.clone());
        Fixture {
            suppliers,
            exclusions,
            service,
        }
    }

    #[tokio::test]
    async fn active_verified_supplier_is_available() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(SupplierId::new("sup-1"), us()))
            .await
            .unwrap();

        let outcome = f
            .service
            .available_suppliers(&weekday_job(), &resolution(vec![candidate("sup-1", 100)], 1))
            .await
            .unwrap();

        assert!(matches!(outcome, AvailabilityOutcome::Serviceable(v) if v.len() == 1));
    }

    #[tokio::test]
    async fn unverified_supplier_is_dropped() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(SupplierId::new("sup-1"), us()).with_verified(false))
            .await
            .unwrap();

        let outcome = f
            .service
            .available_suppliers(&weekday_job(), &resolution(vec![candidate("sup-1", 100)], 1))
            .await
            .unwrap();

        assert!(matches!(outcome, AvailabilityOutcome::Unavailable(_)));
    }

    #[tokio::test]
    async fn excluded_slot_is_dropped_despite_cached_flag() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(SupplierId::new("sup-1"), us()))
            .await
            .unwrap();
        f.exclusions
            .add_service_exclusion(&ServiceExclusion::new(
                SupplierId::new("sup-1"),
                LocationScope::country_wide(us()),
                ServiceType::EndUserCompute,
            ))
            .await
            .unwrap();

        // The candidate's rate still says serviceable; the record wins.
        let outcome = f
            .service
            .available_suppliers(&weekday_job(), &resolution(vec![candidate("sup-1", 100)], 1))
            .await
            .unwrap();

        assert!(matches!(outcome, AvailabilityOutcome::Unavailable(_)));
    }

    #[tokio::test]
    async fn weekend_job_requires_out_of_hours_capability() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(SupplierId::new("sup-1"), us()))
            .await
            .unwrap();
        f.suppliers
            .save(&Supplier::new(SupplierId::new("sup-2"), us()).with_out_of_hours(true))
            .await
            .unwrap();

        let outcome = f
            .service
            .available_suppliers(
                &weekend_job(),
                &resolution(vec![candidate("sup-1", 100), candidate("sup-2", 90)], 2),
            )
            .await
            .unwrap();

        match outcome {
            AvailabilityOutcome::Serviceable(available) => {
                assert_eq!(available.len(), 1);
                assert_eq!(available[0].supplier_id, SupplierId::new("sup-2"));
            }
            AvailabilityOutcome::Unavailable(_) => panic!("expected serviceable"),
        }
    }

    #[tokio::test]
    async fn weekend_without_ooh_suppliers_names_the_reason() {
        let f = fixture();
        f.suppliers
            .save(&Supplier::new(SupplierId::new("sup-1"), us()))
            .await
            .unwrap();

        let outcome = f
            .service
            .available_suppliers(&weekend_job(), &resolution(vec![candidate("sup-1", 100)], 1))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AvailabilityOutcome::Unavailable(UnavailableReason::NoOutOfHoursSuppliers)
        );
    }

    #[tokio::test]
    async fn empty_coverage_reports_no_coverage() {
        let f = fixture();
        let outcome = f
            .service
            .available_suppliers(&weekday_job(), &resolution(vec![], 0))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AvailabilityOutcome::Unavailable(UnavailableReason::NoCoverage)
        );
    }

    #[tokio::test]
    async fn covered_but_unpriced_reports_no_rates() {
        let f = fixture();
        let resolution = ResolutionOutcome {
            candidates: vec![],
            covering_suppliers: 2,
            has_service_rates: false,
        };
        let outcome = f
            .service
            .available_suppliers(&weekday_job(), &resolution)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AvailabilityOutcome::Unavailable(UnavailableReason::NoRatesForService)
        );
    }

    #[tokio::test]
    async fn reason_messages_are_stable() {
        assert_eq!(
            UnavailableReason::NoCoverage.message(),
            "no suppliers in this location"
        );
        assert_eq!(
            UnavailableReason::NoRatesForService.message(),
            "no suppliers have configured rates for this service"
        );
    }
}
