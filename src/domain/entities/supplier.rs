//! # Supplier Entity
//!
//! A service supplier as seen by the pricing core.
//!
//! Account management owns these records; this core consumes the flags and
//! never mutates them.

use crate::domain::value_objects::{CountryCode, SupplierId};
use serde::{Deserialize, Serialize};

/// A service supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    id: SupplierId,
    country: CountryCode,
    offers_out_of_hours: bool,
    active: bool,
    verified: bool,
}

impl Supplier {
    /// Creates a supplier record.
    #[must_use]
    pub fn new(id: SupplierId, country: CountryCode) -> Self {
        Self {
            id,
            country,
            offers_out_of_hours: false,
            active: true,
            verified: true,
        }
    }

    /// Sets the out-of-hours capability flag.
    #[must_use]
    pub fn with_out_of_hours(mut self, offers: bool) -> Self {
        self.offers_out_of_hours = offers;
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets the verified flag.
    #[must_use]
    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Returns the supplier identifier.
    #[must_use]
    pub fn id(&self) -> &SupplierId {
        &self.id
    }

    /// Returns the country of registration.
    #[must_use]
    pub fn country(&self) -> &CountryCode {
        &self.country
    }

    /// Returns true if the supplier accepts out-of-hours work.
    #[must_use]
    pub const fn offers_out_of_hours(&self) -> bool {
        self.offers_out_of_hours
    }

    /// Returns true if the supplier account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the supplier has passed verification.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified
    }

    /// Returns true if the supplier can currently take jobs.
    ///
    /// Requires both the active and verified flags; both are owned by the
    /// external account and verification workflows.
    #[must_use]
    pub const fn is_serviceable(&self) -> bool {
        self.active && self.verified
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_active_verified_no_ooh() {
        let supplier = Supplier::new(SupplierId::new("sup-1"), CountryCode::new("US").unwrap());
        assert!(supplier.is_serviceable());
        assert!(!supplier.offers_out_of_hours());
    }

    #[test]
    fn unverified_supplier_is_not_serviceable() {
        let supplier = Supplier::new(SupplierId::new("sup-1"), CountryCode::new("US").unwrap())
            .with_verified(false);
        assert!(!supplier.is_serviceable());
    }

    #[test]
    fn inactive_supplier_is_not_serviceable() {
        let supplier = Supplier::new(SupplierId::new("sup-1"), CountryCode::new("US").unwrap())
            .with_active(false);
        assert!(!supplier.is_serviceable());
    }

    #[test]
    fn out_of_hours_flag() {
        let supplier = Supplier::new(SupplierId::new("sup-1"), CountryCode::new("GB").unwrap())
            .with_out_of_hours(true);
        assert!(supplier.offers_out_of_hours());
    }
}
