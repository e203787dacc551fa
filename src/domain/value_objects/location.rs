//! # Location Value Objects
//!
//! Validated country codes and the tagged location scope.
//!
//! A rate or coverage record applies to exactly one scope: a whole country
//! or a specific city. Modeling the scope as a tagged union (instead of a
//! pair of nullable foreign keys) makes "both set" and "both null" states
//! unrepresentable.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ids::CityId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated ISO 3166-1 alpha-2 country code, stored uppercase.
///
/// # Examples
///
/// ```
/// use onsite_pricing::domain::value_objects::location::CountryCode;
///
/// let us = CountryCode::new("us").unwrap();
/// assert_eq!(us.as_str(), "US");
/// assert!(CountryCode::new("USA").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Creates a country code, validating it is exactly two ASCII letters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCountryCode` otherwise.
    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let code = code.as_ref().trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(DomainError::InvalidCountryCode(code.to_string()))
        }
    }

    /// Returns the uppercase two-letter code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CountryCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// Discriminant of a [`LocationScope`], used for grouped statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// Country-wide scope.
    Country,
    /// City-specific scope.
    City,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country => write!(f, "countries"),
            Self::City => write!(f, "cities"),
        }
    }
}

/// The location a rate or coverage record applies to.
///
/// Exactly one scope tags each record: either a whole country or a
/// specific city within its country.
///
/// # Examples
///
/// ```
/// use onsite_pricing::domain::value_objects::location::{CountryCode, LocationScope};
/// use onsite_pricing::domain::value_objects::ids::CityId;
///
/// let us = CountryCode::new("US").unwrap();
/// let nyc = LocationScope::city(CityId::new("nyc"), us.clone());
/// assert!(nyc.is_city());
/// assert_eq!(nyc.country(), &us);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationScope {
    /// Applies to every site in a country.
    Country {
        /// The country covered.
        country: CountryCode,
    },
    /// Applies to sites in one city.
    City {
        /// The city covered.
        id: CityId,
        /// The country the city belongs to.
        country: CountryCode,
    },
}

impl LocationScope {
    /// Creates a country-wide scope.
    #[must_use]
    pub const fn country_wide(country: CountryCode) -> Self {
        Self::Country { country }
    }

    /// Creates a city-specific scope.
    #[must_use]
    pub const fn city(id: CityId, country: CountryCode) -> Self {
        Self::City { id, country }
    }

    /// Returns the country this scope lies in.
    #[must_use]
    pub const fn country(&self) -> &CountryCode {
        match self {
            Self::Country { country } | Self::City { country, .. } => country,
        }
    }

    /// Returns the city identifier for city scopes.
    #[must_use]
    pub const fn city_id(&self) -> Option<&CityId> {
        match self {
            Self::Country { .. } => None,
            Self::City { id, .. } => Some(id),
        }
    }

    /// Returns true for city scopes.
    #[must_use]
    pub const fn is_city(&self) -> bool {
        matches!(self, Self::City { .. })
    }

    /// Returns the scope discriminant.
    #[must_use]
    pub const fn location_type(&self) -> LocationType {
        match self {
            Self::Country { .. } => LocationType::Country,
            Self::City { .. } => LocationType::City,
        }
    }
}

impl fmt::Display for LocationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country { country } => write!(f, "{}", country),
            Self::City { id, country } => write!(f, "{}/{}", country, id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn country_code_normalizes_case() {
        assert_eq!(CountryCode::new("gb").unwrap().as_str(), "GB");
        assert_eq!(CountryCode::new(" De ").unwrap().as_str(), "DE");
    }

    #[test]
    fn country_code_rejects_malformed() {
        assert!(CountryCode::new("USA").is_err());
        assert!(CountryCode::new("U").is_err());
        assert!(CountryCode::new("1A").is_err());
        assert!(CountryCode::new("").is_err());
    }

    #[test]
    fn scope_accessors() {
        let us = CountryCode::new("US").unwrap();
        let country = LocationScope::country_wide(us.clone());
        let city = LocationScope::city(CityId::new("nyc"), us.clone());

        assert_eq!(country.country(), &us);
        assert_eq!(country.city_id(), None);
        assert!(!country.is_city());
        assert_eq!(country.location_type(), LocationType::Country);

        assert_eq!(city.country(), &us);
        assert_eq!(city.city_id(), Some(&CityId::new("nyc")));
        assert!(city.is_city());
        assert_eq!(city.location_type(), LocationType::City);
    }

    #[test]
    fn scope_display() {
        let us = CountryCode::new("US").unwrap();
        assert_eq!(LocationScope::country_wide(us.clone()).to_string(), "US");
        assert_eq!(
            LocationScope::city(CityId::new("nyc"), us).to_string(),
            "US/nyc"
        );
    }

    #[test]
    fn scope_serde_is_tagged() {
        let us = CountryCode::new("US").unwrap();
        let json = serde_json::to_value(LocationScope::country_wide(us)).unwrap();
        assert_eq!(json["type"], "country");
        assert_eq!(json["country"], "US");
    }
}
