//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository traits (ports) over the rate
//! catalog's record store. Implementations can use different backends
//! like PostgreSQL or in-memory storage.
//!
//! # Available Repositories
//!
//! - [`RateRepository`]: rate records keyed by their natural key
//! - [`SupplierRepository`]: supplier capability records
//! - [`CoverageRepository`]: coverage country / priority city declarations
//! - [`ExclusionRepository`]: service and response-time exclusions
//!
//! All pricing and analytics reads are snapshot reads; the only compound
//! write is the rate upsert, which every adapter must implement as a
//! single atomic insert-or-update on the natural key.

use crate::domain::entities::{
    CoverageCountry, ExclusionSet, PriorityCity, Rate, RateKey, ResponseTimeExclusion,
    ServiceExclusion, Supplier,
};
use crate::domain::value_objects::{
    CityId, CountryCode, ServiceLevel, ServiceType, SupplierId, UsdCents,
};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for rate records.
///
/// Rate records are uniquely keyed by [`RateKey`]; the upsert is the only
/// write path that creates rows and is atomic per key.
#[async_trait]
pub trait RateRepository: Send + Sync + fmt::Debug {
    /// Inserts or updates the rate for a key in a single atomic operation.
    ///
    /// When the key exists its amount is replaced (bumping the version);
    /// otherwise a new serviceable record is created. Returns the stored
    /// record.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` on storage failure.
    async fn upsert(&self, key: &RateKey, amount: Option<UsdCents>) -> RepositoryResult<Rate>;

    /// Gets the rate stored under a key.
    ///
    /// Returns `None` if no record exists for the key.
    async fn get(&self, key: &RateKey) -> RepositoryResult<Option<Rate>>;

    /// Finds all rate records for a supplier.
    async fn find_by_supplier(&self, supplier_id: &SupplierId) -> RepositoryResult<Vec<Rate>>;

    /// Finds all rate records across suppliers for a service slot.
    ///
    /// Used to build cross-supplier market samples.
    async fn find_for_service(
        &self,
        service_type: ServiceType,
        service_level: ServiceLevel,
    ) -> RepositoryResult<Vec<Rate>>;

    /// Replaces the amount stored under a key.
    ///
    /// Returns `false` if the key does not exist.
    async fn set_amount(&self, key: &RateKey, amount: UsdCents) -> RepositoryResult<bool>;

    /// Replaces the cached serviceable flag under a key.
    ///
    /// Returns `false` if the key does not exist.
    async fn set_serviceable(&self, key: &RateKey, serviceable: bool) -> RepositoryResult<bool>;

    /// Deletes the rate stored under a key (explicit opt-out).
    ///
    /// Returns `Ok(true)` if a record was deleted, `Ok(false)` otherwise.
    async fn delete(&self, key: &RateKey) -> RepositoryResult<bool>;

    /// Counts all rate records.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Repository for supplier records.
///
/// Suppliers are owned by the account system; this core only reads them.
#[async_trait]
pub trait SupplierRepository: Send + Sync + fmt::Debug {
    /// Saves a supplier record.
    async fn save(&self, supplier: &Supplier) -> RepositoryResult<()>;

    /// Gets a supplier by id.
    ///
    /// Returns `None` if the supplier does not exist.
    async fn get(&self, id: &SupplierId) -> RepositoryResult<Option<Supplier>>;

    /// Gets all suppliers.
    async fn get_all(&self) -> RepositoryResult<Vec<Supplier>>;

    /// Counts all suppliers.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Repository for coverage declarations.
#[async_trait]
pub trait CoverageRepository: Send + Sync + fmt::Debug {
    /// Adds a country-wide coverage declaration.
    async fn add_country(&self, coverage: &CoverageCountry) -> RepositoryResult<()>;

    /// Adds a priority city declaration.
    async fn add_city(&self, city: &PriorityCity) -> RepositoryResult<()>;

    /// Returns the countries a supplier covers.
    async fn countries_for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> RepositoryResult<Vec<CoverageCountry>>;

    /// Returns the priority cities a supplier declares.
    async fn cities_for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> RepositoryResult<Vec<PriorityCity>>;

    /// Returns every supplier with coverage of a country.
    async fn suppliers_covering(
        &self,
        country: &CountryCode,
    ) -> RepositoryResult<Vec<SupplierId>>;

    /// Returns true if the supplier declares the city as a priority city.
    async fn has_priority_city(
        &self,
        supplier_id: &SupplierId,
        city_id: &CityId,
    ) -> RepositoryResult<bool>;
}

/// Repository for exclusion records.
#[async_trait]
pub trait ExclusionRepository: Send + Sync + fmt::Debug {
    /// Records a service-level exclusion. Idempotent.
    async fn add_service_exclusion(&self, exclusion: &ServiceExclusion) -> RepositoryResult<()>;

    /// Removes a service-level exclusion.
    ///
    /// Returns `Ok(true)` if a record was removed.
    async fn remove_service_exclusion(
        &self,
        exclusion: &ServiceExclusion,
    ) -> RepositoryResult<bool>;

    /// Records a response-time exclusion. Idempotent.
    async fn add_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> RepositoryResult<()>;

    /// Removes a response-time exclusion.
    ///
    /// Returns `Ok(true)` if a record was removed.
    async fn remove_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> RepositoryResult<bool>;

    /// Returns the snapshot of a supplier's exclusions.
    async fn exclusions_for(&self, supplier_id: &SupplierId) -> RepositoryResult<ExclusionSet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error() {
        let err = RepositoryError::not_found("Rate", "rate-123");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("rate-123"));
    }

    #[test]
    fn connection_and_query_errors() {
        assert!(RepositoryError::connection("refused")
            .to_string()
            .contains("refused"));
        assert!(RepositoryError::query("bad sql")
            .to_string()
            .contains("bad sql"));
    }
}
