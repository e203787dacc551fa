//! # Domain Enums
//!
//! Enumeration types for service categories and response-time tiers.
//!
//! This module provides:
//!
//! - [`ServiceType`] - the three categories of on-site technical work
//! - [`ServiceLevel`] - the three response-time tiers, ordered by urgency
//! - [`ParseEnumError`] - error for unrecognized wire values
//!
//! Both enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits. Two legacy response-time tiers
//! exist in historical data; they are rejected at parse time and never
//! enter a computation path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an enum from an unrecognized string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {0} value: {1:?}")]
pub struct ParseEnumError(pub &'static str, pub String);

/// Category of on-site technical work.
///
/// # Examples
///
/// ```
/// use onsite_pricing::domain::value_objects::enums::ServiceType;
///
/// let euc: ServiceType = "Level 1 End User Compute Engineer".parse().unwrap();
/// assert_eq!(euc, ServiceType::EndUserCompute);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ServiceType {
    /// Level 1 end-user computing support.
    EndUserCompute = 0,
    /// Level 1 network support.
    NetworkSupport = 1,
    /// Smart-hands datacenter work.
    SmartHands = 2,
}

impl ServiceType {
    /// All service types, in catalog order.
    pub const ALL: [Self; 3] = [Self::EndUserCompute, Self::NetworkSupport, Self::SmartHands];

    /// Number of service types in the catalog.
    pub const COUNT: u64 = 3;

    /// Returns the customer-facing category name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::EndUserCompute => "Level 1 End User Compute Engineer",
            Self::NetworkSupport => "Level 1 Network Support Engineer",
            Self::SmartHands => "Smart Hands Engineer",
        }
    }

    /// Returns the snake_case wire name.
    #[must_use]
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::EndUserCompute => "end_user_compute",
            Self::NetworkSupport => "network_support",
            Self::SmartHands => "smart_hands",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ServiceType {
    type Err = ParseEnumError;

    /// Accepts both the customer-facing category name and the snake_case
    /// wire name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        for service_type in Self::ALL {
            if lowered == service_type.display_name().to_lowercase()
                || lowered == service_type.as_wire_str()
            {
                return Ok(service_type);
            }
        }
        Err(ParseEnumError("ServiceType", s.to_string()))
    }
}

/// Response-time tier, ordered from most to least urgent.
///
/// The derived `Ord` follows urgency: `SameBusinessDay` (fastest, most
/// expensive) sorts before `Scheduled` (slowest, cheapest).
///
/// # Examples
///
/// ```
/// use onsite_pricing::domain::value_objects::enums::ServiceLevel;
///
/// let level: ServiceLevel = "same_day".parse().unwrap();
/// assert_eq!(level, ServiceLevel::SameBusinessDay);
/// assert_eq!(level.as_wire_str(), "same_day");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ServiceLevel {
    /// Arrival the same business day.
    SameBusinessDay = 0,
    /// Arrival the next business day.
    NextBusinessDay = 1,
    /// Arrival at an agreed future slot.
    Scheduled = 2,
}

impl ServiceLevel {
    /// All service levels, in urgency order.
    pub const ALL: [Self; 3] = [Self::SameBusinessDay, Self::NextBusinessDay, Self::Scheduled];

    /// Number of service levels.
    pub const COUNT: u64 = 3;

    /// Returns the canonical snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameBusinessDay => "same_business_day",
            Self::NextBusinessDay => "next_business_day",
            Self::Scheduled => "scheduled",
        }
    }

    /// Returns the short wire name used by the quote request interface.
    #[must_use]
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::SameBusinessDay => "same_day",
            Self::NextBusinessDay => "next_day",
            Self::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceLevel {
    type Err = ParseEnumError;

    /// Accepts both the wire names (`same_day`, `next_day`, `scheduled`)
    /// and the canonical names (`same_business_day`, ...). Legacy tiers
    /// from historical data are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "same_day" | "same_business_day" => Ok(Self::SameBusinessDay),
            "next_day" | "next_business_day" => Ok(Self::NextBusinessDay),
            "scheduled" => Ok(Self::Scheduled),
            _ => Err(ParseEnumError("ServiceLevel", s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn service_type_parses_display_name() {
        let parsed: ServiceType = "Level 1 End User Compute Engineer".parse().unwrap();
        assert_eq!(parsed, ServiceType::EndUserCompute);
    }

    #[test]
    fn service_type_parses_wire_name() {
        assert_eq!(
            "network_support".parse::<ServiceType>().unwrap(),
            ServiceType::NetworkSupport
        );
        assert_eq!(
            "smart_hands".parse::<ServiceType>().unwrap(),
            ServiceType::SmartHands
        );
    }

    #[test]
    fn service_type_rejects_unknown() {
        assert!("plumbing".parse::<ServiceType>().is_err());
    }

    #[test]
    fn service_level_parses_wire_and_canonical() {
        assert_eq!(
            "same_day".parse::<ServiceLevel>().unwrap(),
            ServiceLevel::SameBusinessDay
        );
        assert_eq!(
            "next_business_day".parse::<ServiceLevel>().unwrap(),
            ServiceLevel::NextBusinessDay
        );
        assert_eq!(
            "scheduled".parse::<ServiceLevel>().unwrap(),
            ServiceLevel::Scheduled
        );
    }

    #[test]
    fn service_level_rejects_legacy_tiers() {
        assert!("four_hour".parse::<ServiceLevel>().is_err());
        assert!("two_hour".parse::<ServiceLevel>().is_err());
    }

    #[test]
    fn service_level_ordering_by_urgency() {
        assert!(ServiceLevel::SameBusinessDay < ServiceLevel::NextBusinessDay);
        assert!(ServiceLevel::NextBusinessDay < ServiceLevel::Scheduled);
    }

    #[test]
    fn counts_match_all_arrays() {
        assert_eq!(ServiceType::ALL.len() as u64, ServiceType::COUNT);
        assert_eq!(ServiceLevel::ALL.len() as u64, ServiceLevel::COUNT);
    }
}
