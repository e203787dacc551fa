//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`RateId`]: UUID-based rate record identifier
//! - [`SupplierId`], [`CityId`]: string-based identifiers
//!
//! ## Numeric Types
//!
//! - [`UsdCents`]: integer-cent money with checked arithmetic and
//!   deterministic half-up rounding
//!
//! ## Locations
//!
//! - [`CountryCode`]: validated ISO alpha-2 code
//! - [`LocationScope`]: tagged country-wide or city-specific scope
//! - [`LocationType`]: country/city discriminant for grouped stats
//!
//! ## Domain Enums
//!
//! - [`ServiceType`]: category of on-site technical work
//! - [`ServiceLevel`]: response-time tier (same day, next day, scheduled)

pub mod enums;
pub mod ids;
pub mod location;
pub mod money;

pub use enums::{ParseEnumError, ServiceLevel, ServiceType};
pub use ids::{CityId, RateId, SupplierId};
pub use location::{CountryCode, LocationScope, LocationType};
pub use money::UsdCents;
