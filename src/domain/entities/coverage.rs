//! # Coverage Records
//!
//! Per-supplier declarations of serviceable locations.
//!
//! A [`CoverageCountry`] row declares country-wide coverage. A
//! [`PriorityCity`] row marks a city in which the supplier maintains a
//! dedicated presence; its rates take precedence over the country-wide
//! rates for that supplier only.

use crate::domain::value_objects::{CityId, CountryCode, SupplierId};
use serde::{Deserialize, Serialize};

/// Country-wide coverage declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoverageCountry {
    supplier_id: SupplierId,
    country: CountryCode,
}

impl CoverageCountry {
    /// Creates a country coverage record.
    #[must_use]
    pub const fn new(supplier_id: SupplierId, country: CountryCode) -> Self {
        Self {
            supplier_id,
            country,
        }
    }

    /// Returns the covering supplier.
    #[must_use]
    pub const fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    /// Returns the covered country.
    #[must_use]
    pub const fn country(&self) -> &CountryCode {
        &self.country
    }
}

/// City-specific coverage declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriorityCity {
    supplier_id: SupplierId,
    city_id: CityId,
    country: CountryCode,
}

impl PriorityCity {
    /// Creates a priority city record.
    #[must_use]
    pub const fn new(supplier_id: SupplierId, city_id: CityId, country: CountryCode) -> Self {
        Self {
            supplier_id,
            city_id,
            country,
        }
    }

    /// Returns the covering supplier.
    #[must_use]
    pub const fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    /// Returns the covered city.
    #[must_use]
    pub const fn city_id(&self) -> &CityId {
        &self.city_id
    }

    /// Returns the country the city belongs to.
    #[must_use]
    pub const fn country(&self) -> &CountryCode {
        &self.country
    }
}
