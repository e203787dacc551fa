//! # Exclusion Records
//!
//! Supplier opt-outs that remove slots from the completion denominator.
//!
//! Two independently-scoped exclusion kinds exist:
//!
//! - [`ServiceExclusion`] blocks an entire service type at a location,
//!   removing all three response-time tiers from the denominator.
//! - [`ResponseTimeExclusion`] blocks a single tier within a service type
//!   at a location, removing exactly one slot.
//!
//! Exclusions are authoritative over the cached `serviceable` flag on rate
//! rows. [`ExclusionSet`] is a per-supplier read-time snapshot answering
//! membership queries without further storage access.

use crate::domain::value_objects::{LocationScope, ServiceLevel, ServiceType, SupplierId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Blocks an entire service type at a location for one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceExclusion {
    supplier_id: SupplierId,
    scope: LocationScope,
    service_type: ServiceType,
}

impl ServiceExclusion {
    /// Creates a service-level exclusion.
    #[must_use]
    pub const fn new(
        supplier_id: SupplierId,
        scope: LocationScope,
        service_type: ServiceType,
    ) -> Self {
        Self {
            supplier_id,
            scope,
            service_type,
        }
    }

    /// Returns the excluding supplier.
    #[must_use]
    pub const fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    /// Returns the excluded location.
    #[must_use]
    pub const fn scope(&self) -> &LocationScope {
        &self.scope
    }

    /// Returns the excluded service type.
    #[must_use]
    pub const fn service_type(&self) -> ServiceType {
        self.service_type
    }
}

/// Blocks one response-time tier within a service type at a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseTimeExclusion {
    supplier_id: SupplierId,
    scope: LocationScope,
    service_type: ServiceType,
    service_level: ServiceLevel,
}

impl ResponseTimeExclusion {
    /// Creates a response-time exclusion.
    #[must_use]
    pub const fn new(
        supplier_id: SupplierId,
        scope: LocationScope,
        service_type: ServiceType,
        service_level: ServiceLevel,
    ) -> Self {
        Self {
            supplier_id,
            scope,
            service_type,
            service_level,
        }
    }

    /// Returns the excluding supplier.
    #[must_use]
    pub const fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    /// Returns the excluded location.
    #[must_use]
    pub const fn scope(&self) -> &LocationScope {
        &self.scope
    }

    /// Returns the excluded service type.
    #[must_use]
    pub const fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Returns the excluded tier.
    #[must_use]
    pub const fn service_level(&self) -> ServiceLevel {
        self.service_level
    }
}

/// Read-time snapshot of one supplier's exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    service: HashSet<(LocationScope, ServiceType)>,
    response: HashSet<(LocationScope, ServiceType, ServiceLevel)>,
}

impl ExclusionSet {
    /// Builds a snapshot from exclusion records.
    ///
    /// Records belonging to other suppliers must be filtered out by the
    /// caller; the set does not re-check ownership.
    #[must_use]
    pub fn from_records(
        service: impl IntoIterator<Item = ServiceExclusion>,
        response: impl IntoIterator<Item = ResponseTimeExclusion>,
    ) -> Self {
        Self {
            service: service
                .into_iter()
                .map(|e| (e.scope, e.service_type))
                .collect(),
            response: response
                .into_iter()
                .map(|e| (e.scope, e.service_type, e.service_level))
                .collect(),
        }
    }

    /// Returns true if the whole service type is excluded at the location.
    #[must_use]
    pub fn is_service_excluded(&self, scope: &LocationScope, service_type: ServiceType) -> bool {
        self.service.contains(&(scope.clone(), service_type))
    }

    /// Returns true if the specific slot is excluded, by either kind.
    #[must_use]
    pub fn is_excluded(
        &self,
        scope: &LocationScope,
        service_type: ServiceType,
        service_level: ServiceLevel,
    ) -> bool {
        self.is_service_excluded(scope, service_type)
            || self
                .response
                .contains(&(scope.clone(), service_type, service_level))
    }

    /// Returns true if no exclusions are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.service.is_empty() && self.response.is_empty()
    }
}
