//! # Rate Entity
//!
//! An hourly rate record published by a supplier.
//!
//! A rate is uniquely keyed by `(supplier, scope, service type, service
//! level)`. A record with `amount = None` is a price gap (the supplier has
//! not filled the slot in); `serviceable = false` is a deliberate opt-out.
//! The two are tracked separately and completion accounting never counts a
//! slot under both.
//!
//! The `serviceable` flag is a cached projection of the exclusion records,
//! which are the source of truth; it may be resynchronized from them at
//! any time without loss of information.

use crate::domain::value_objects::{
    LocationScope, RateId, ServiceLevel, ServiceType, SupplierId, UsdCents,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Natural unique key of a rate record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateKey {
    /// Supplier publishing the rate.
    pub supplier_id: SupplierId,
    /// Location the rate applies to.
    pub scope: LocationScope,
    /// Category of work.
    pub service_type: ServiceType,
    /// Response-time tier.
    pub service_level: ServiceLevel,
}

impl RateKey {
    /// Creates a rate key.
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
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.supplier_id,
            self.scope,
            self.service_type.as_wire_str(),
            self.service_level
        )
    }
}

/// An hourly rate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    id: RateId,
    key: RateKey,
    amount: Option<UsdCents>,
    serviceable: bool,
    version: u64,
    updated_at: DateTime<Utc>,
}

impl Rate {
    /// Creates a new rate record with a fresh identifier.
    #[must_use]
    pub fn new(key: RateKey, amount: Option<UsdCents>) -> Self {
        Self {
            id: RateId::generate(),
            key,
            amount,
            serviceable: true,
            version: 0,
            updated_at: Utc::now(),
        }
    }

    /// Reconstructs a rate record from stored fields.
    #[must_use]
    pub fn from_parts(
        id: RateId,
        key: RateKey,
        amount: Option<UsdCents>,
        serviceable: bool,
        version: u64,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            key,
            amount,
            serviceable,
            version,
            updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> RateId {
        self.id
    }

    /// Returns the natural key.
    #[must_use]
    pub const fn key(&self) -> &RateKey {
        &self.key
    }

    /// Returns the hourly amount, if configured.
    #[must_use]
    pub const fn amount(&self) -> Option<UsdCents> {
        self.amount
    }

    /// Returns true if a price is configured for this slot.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.amount.is_some()
    }

    /// Returns the cached serviceable flag.
    #[must_use]
    pub const fn serviceable(&self) -> bool {
        self.serviceable
    }

    /// Returns true if this rate can price a job right now.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.serviceable && self.amount.is_some()
    }

    /// Returns the optimistic-locking version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the last modification time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the amount, bumping the version and timestamp.
    pub fn set_amount(&mut self, amount: Option<UsdCents>) {
        self.amount = amount;
        self.touch();
    }

    /// Replaces the cached serviceable flag, bumping version and timestamp.
    pub fn set_serviceable(&mut self, serviceable: bool) {
        self.serviceable = serviceable;
        self.touch();
    }

    fn touch(&mut self) {
        self.version = self.version.saturating_add(1);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CityId, CountryCode};

    fn key() -> RateKey {
        RateKey::new(
            SupplierId::new("sup-1"),
            LocationScope::city(CityId::new("nyc"), CountryCode::new("US").unwrap()),
            ServiceType::EndUserCompute,
            ServiceLevel::SameBusinessDay,
        )
    }

    #[test]
    fn new_rate_is_serviceable_at_version_zero() {
        let rate = Rate::new(key(), Some(UsdCents::from_dollars(100).unwrap()));
        assert!(rate.serviceable());
        assert!(rate.is_configured());
        assert!(rate.is_usable());
        assert_eq!(rate.version(), 0);
    }

    #[test]
    fn price_gap_is_not_usable() {
        let rate = Rate::new(key(), None);
        assert!(!rate.is_configured());
        assert!(!rate.is_usable());
        assert!(rate.serviceable());
    }

    #[test]
    fn opt_out_is_not_usable_even_with_amount() {
        let mut rate = Rate::new(key(), Some(UsdCents::from_dollars(80).unwrap()));
        rate.set_serviceable(false);
        assert!(rate.is_configured());
        assert!(!rate.is_usable());
    }

    #[test]
    fn mutations_bump_version() {
        let mut rate = Rate::new(key(), None);
        rate.set_amount(Some(UsdCents::from_dollars(50).unwrap()));
        assert_eq!(rate.version(), 1);
        rate.set_serviceable(false);
        assert_eq!(rate.version(), 2);
    }

    #[test]
    fn key_display_names_all_parts() {
        let display = key().to_string();
        assert!(display.contains("sup-1"));
        assert!(display.contains("US/nyc"));
        assert!(display.contains("end_user_compute"));
        assert!(display.contains("same_business_day"));
    }
}
