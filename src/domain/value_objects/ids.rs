//! # Identifier Value Objects
//!
//! Typed identifiers for suppliers, cities, and rate records.
//!
//! Supplier and city identifiers originate in external systems (account
//! management and geocoding) and are carried as opaque strings. Rate
//! identifiers are minted by this core as UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier for a service supplier.
///
/// Opaque string assigned by the account system; this core never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

impl SupplierId {
    /// Creates a supplier identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SupplierId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier for a city, as assigned by the external geocoding collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(String);

impl CityId {
    /// Creates a city identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// UUID-based identifier for a rate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateId(Uuid);

impl RateId {
    /// Generates a new random rate identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for RateId {
    fn default() -> Self {
        Self::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_id_round_trip() {
        let id = SupplierId::new("sup-42");
        assert_eq!(id.as_str(), "sup-42");
        assert_eq!(id.to_string(), "sup-42");
    }

    #[test]
    fn city_id_equality() {
        assert_eq!(CityId::new("nyc"), CityId::from("nyc"));
        assert_ne!(CityId::new("nyc"), CityId::new("lon"));
    }

    #[test]
    fn rate_ids_are_unique() {
        assert_ne!(RateId::generate(), RateId::generate());
    }

    #[test]
    fn rate_id_from_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = RateId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }
}
