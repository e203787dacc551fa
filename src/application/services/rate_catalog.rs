//! # Rate Catalog Service
//!
//! Supplier self-service write paths for rates and exclusions.
//!
//! Rate writes go through the repository's atomic upsert; deletes happen
//! only on explicit opt-out. Exclusion changes resynchronize the cached
//! `serviceable` flag on matching rate rows within the same call, so a
//! reader never sees an exclusion recorded but not projected.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{Rate, RateKey, ResponseTimeExclusion, ServiceExclusion};
use crate::domain::value_objects::{SupplierId, UsdCents};
use crate::infrastructure::persistence::traits::{
    ExclusionRepository, RateRepository, SupplierRepository,
};
use std::sync::Arc;
use tracing::debug;

/// Write-side service for a supplier's rate card.
#[derive(Debug, Clone)]
pub struct RateCatalogService {
    rates: Arc<dyn RateRepository>,
    suppliers: Arc<dyn SupplierRepository>,
    exclusions: Arc<dyn ExclusionRepository>,
}

impl RateCatalogService {
    /// Creates a rate catalog service.
    #[must_use]
    pub fn new(
        rates: Arc<dyn RateRepository>,
        suppliers: Arc<dyn SupplierRepository>,
        exclusions: Arc<dyn ExclusionRepository>,
    ) -> Self {
        Self {
            rates,
            suppliers,
            exclusions,
        }
    }

    /// Creates or updates a single rate slot.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` when the supplier does not
    /// exist, and repository errors on storage failure.
    pub async fn upsert_rate(
        &self,
        key: &RateKey,
        amount: Option<UsdCents>,
    ) -> ApplicationResult<Rate> {
        self.require_supplier(&key.supplier_id).await?;
        let rate = self.rates.upsert(key, amount).await?;
        debug!(key = %key, version = rate.version(), "rate upserted");
        Ok(rate)
    }

    /// Creates or updates many slots for one supplier.
    ///
    /// Every key must belong to the requesting supplier; a mismatch
    /// rejects the whole batch before any write.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` on a foreign key in the
    /// batch, `NotFound` for unknown suppliers, and repository errors on
    /// storage failure.
    pub async fn bulk_upsert(
        &self,
        supplier_id: &SupplierId,
        entries: &[(RateKey, Option<UsdCents>)],
    ) -> ApplicationResult<u64> {
        self.require_supplier(supplier_id).await?;
        if let Some((key, _)) = entries.iter().find(|(k, _)| &k.supplier_id != supplier_id) {
            return Err(ApplicationError::validation(format!(
                "rate key {key} does not belong to supplier {supplier_id}"
            )));
        }

        let mut written = 0u64;
        for (key, amount) in entries {
            self.rates.upsert(key, *amount).await?;
            written += 1;
        }
        debug!(supplier = %supplier_id, written, "bulk upsert complete");
        Ok(written)
    }

    /// Deletes a rate slot (explicit opt-out).
    ///
    /// Returns `false` if no record existed.
    ///
    /// # Errors
    ///
    /// Returns repository errors on storage failure.
    pub async fn opt_out(&self, key: &RateKey) -> ApplicationResult<bool> {
        Ok(self.rates.delete(key).await?)
    }

    /// Records a service exclusion and resyncs affected rate rows.
    ///
    /// # Errors
    ///
    /// Returns repository errors on storage failure.
    pub async fn add_service_exclusion(
        &self,
        exclusion: &ServiceExclusion,
    ) -> ApplicationResult<()> {
        self.exclusions.add_service_exclusion(exclusion).await?;
        self.resync_serviceable(exclusion.supplier_id()).await
    }

    /// Removes a service exclusion and resyncs affected rate rows.
    ///
    /// # Errors
    ///
    /// Returns repository errors on storage failure.
    pub async fn remove_service_exclusion(
        &self,
        exclusion: &ServiceExclusion,
    ) -> ApplicationResult<bool> {
        let removed = self.exclusions.remove_service_exclusion(exclusion).await?;
        self.resync_serviceable(exclusion.supplier_id()).await?;
        Ok(removed)
    }

    /// Records a response-time exclusion and resyncs affected rate rows.
    ///
    /// # Errors
    ///
    /// Returns repository errors on storage failure.
    pub async fn add_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> ApplicationResult<()> {
        self.exclusions.add_response_exclusion(exclusion).await?;
        self.resync_serviceable(exclusion.supplier_id()).await
    }

    /// Removes a response-time exclusion and resyncs affected rate rows.
    ///
    /// # Errors
    ///
    /// Returns repository errors on storage failure.
    pub async fn remove_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> ApplicationResult<bool> {
        let removed = self
            .exclusions
            .remove_response_exclusion(exclusion)
            .await?;
        self.resync_serviceable(exclusion.supplier_id()).await?;
        Ok(removed)
    }

    /// Recomputes the cached flag from the exclusion records.
    ///
    /// The exclusion set is the source of truth; this projection may be
    /// re-run at any time without loss of information.
    async fn resync_serviceable(&self, supplier_id: &SupplierId) -> ApplicationResult<()> {
        let exclusions = self.exclusions.exclusions_for(supplier_id).await?;
        for rate in self.rates.find_by_supplier(supplier_id).await? {
            let key = rate.key();
            let should_be =
                !exclusions.is_excluded(&key.scope, key.service_type, key.service_level);
            if rate.serviceable() != should_be {
                self.rates.set_serviceable(key, should_be).await?;
            }
        }
        Ok(())
    }

    async fn require_supplier(&self, supplier_id: &SupplierId) -> ApplicationResult<()> {
        if self.suppliers.get(supplier_id).await?.is_none() {
            return Err(ApplicationError::not_found(
                "Supplier",
                supplier_id.as_str(),
            ));
        }
        Ok(())
    }
}
