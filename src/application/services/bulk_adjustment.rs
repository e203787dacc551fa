//! # Bulk Adjustment Engine
//!
//! Preview-then-apply percentage changes over a supplier's rate card.
//!
//! Preview and apply run the same selection and arithmetic; apply writes
//! the previewed amounts back. Selection is always scoped to the
//! requesting supplier's own rows, so a malformed filter can never touch
//! another supplier's rates. Rows without a configured amount are never
//! selected. An empty match set is a zero-count success, not an error.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::Rate;
use crate::domain::value_objects::{
    CityId, CountryCode, LocationScope, RateId, ServiceLevel, ServiceType, SupplierId, UsdCents,
};
use crate::infrastructure::persistence::traits::{RateRepository, SupplierRepository};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Optional narrowing filters for a bulk adjustment.
///
/// An absent filter matches everything for that dimension. A city-scoped
/// rate matches the location filters through either its city id or its
/// country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustmentFilters {
    /// Restrict to these service types.
    pub service_types: Option<Vec<ServiceType>>,
    /// Restrict to these response-time tiers.
    pub service_levels: Option<Vec<ServiceLevel>>,
    /// Restrict to rates in these countries.
    pub country_codes: Option<Vec<CountryCode>>,
    /// Restrict to rates for these cities.
    pub city_ids: Option<Vec<CityId>>,
}

impl AdjustmentFilters {
    fn matches(&self, rate: &Rate) -> bool {
        let key = rate.key();
        if let Some(types) = &self.service_types {
            if !types.contains(&key.service_type) {
                return false;
            }
        }
        if let Some(levels) = &self.service_levels {
            if !levels.contains(&key.service_level) {
                return false;
            }
        }
        self.matches_location(&key.scope)
    }

    fn matches_location(&self, scope: &LocationScope) -> bool {
        if self.country_codes.is_none() && self.city_ids.is_none() {
            return true;
        }
        let by_country = self
            .country_codes
            .as_ref()
            .is_some_and(|codes| codes.contains(scope.country()));
        let by_city = scope.city_id().is_some_and(|id| {
            self.city_ids
                .as_ref()
                .is_some_and(|cities| cities.contains(id))
        });
        by_country || by_city
    }
}

/// One row of a bulk adjustment preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentPreviewRow {
    /// The rate record.
    pub id: RateId,
    /// Service type of the row.
    pub service_type: ServiceType,
    /// Tier of the row.
    pub service_level: ServiceLevel,
    /// Country of the row's scope.
    pub country_code: CountryCode,
    /// City of the row's scope, when city-specific.
    pub city_id: Option<CityId>,
    /// Amount before the adjustment.
    pub current_rate: UsdCents,
    /// Amount after the adjustment.
    pub new_rate: UsdCents,
    /// The requested percentage change.
    pub change_percent: Decimal,
}

/// Result of applying a bulk adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedAdjustment {
    /// Number of rate rows written.
    pub updated_count: u64,
}

/// Computes and applies percentage changes over a supplier's rates.
#[derive(Debug, Clone)]
pub struct BulkAdjustmentService {
    rates: Arc<dyn RateRepository>,
    suppliers: Arc<dyn SupplierRepository>,
}

impl BulkAdjustmentService {
    /// Creates a bulk adjustment service.
    #[must_use]
    pub fn new(rates: Arc<dyn RateRepository>, suppliers: Arc<dyn SupplierRepository>) -> Self {
        Self { rates, suppliers }
    }

    /// Computes the adjusted amounts without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` for unknown suppliers,
    /// `ApplicationError::Validation` for a decrease of 100% or more,
    /// and repository errors on storage failure.
    pub async fn preview(
        &self,
        supplier_id: &SupplierId,
        percent: Decimal,
        filters: &AdjustmentFilters,
    ) -> ApplicationResult<Vec<AdjustmentPreviewRow>> {
        self.select(supplier_id, percent, filters).await
    }

    /// Applies the adjustment, writing each previewed amount back.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::preview`].
    pub async fn apply(
        &self,
        supplier_id: &SupplierId,
        percent: Decimal,
        filters: &AdjustmentFilters,
    ) -> ApplicationResult<AppliedAdjustment> {
        let rows = self.select(supplier_id, percent, filters).await?;
        let mut updated_count = 0u64;
        for row in &rows {
            let scope = match &row.city_id {
                Some(city) => LocationScope::city(city.clone(), row.country_code.clone()),
                None => LocationScope::country_wide(row.country_code.clone()),
            };
            let key = crate::domain::entities::RateKey::new(
                supplier_id.clone(),
                scope,
                row.service_type,
                row.service_level,
            );
            if self.rates.set_amount(&key, row.new_rate).await? {
                updated_count += 1;
            }
        }
        Ok(AppliedAdjustment { updated_count })
    }

    async fn select(
        &self,
        supplier_id: &SupplierId,
        percent: Decimal,
        filters: &AdjustmentFilters,
    ) -> ApplicationResult<Vec<AdjustmentPreviewRow>> {
        if self.suppliers.get(supplier_id).await?.is_none() {
            return Err(ApplicationError::not_found(
                "Supplier",
                supplier_id.as_str(),
            ));
        }
        if percent <= Decimal::from(-100) {
            return Err(ApplicationError::validation(
                "adjustment percent must be greater than -100",
            ));
        }

        let mut rows = Vec::new();
        for rate in self.rates.find_by_supplier(supplier_id).await? {
            let Some(current) = rate.amount() else {
                continue;
            };
            if !filters.matches(&rate) {
                continue;
            }
            let new_rate = current.apply_percent(percent)?;
            rows.push(AdjustmentPreviewRow {
                id: rate.id(),
                service_type: rate.key().service_type,
                service_level: rate.key().service_level,
                country_code: rate.key().scope.country().clone(),
                city_id: rate.key().scope.city_id().cloned(),
                current_rate: current,
                new_rate,
                change_percent: percent,
            });
        }
        Ok(rows)
    }
}
