//! # Domain Layer
//!
//! Core business types and rules for rate resolution and pricing.
//!
//! This layer has no dependencies on infrastructure or transport concerns.
//! It contains:
//!
//! - [`value_objects`]: validated immutable types (money, locations, enums)
//! - [`entities`]: records with identity (suppliers, rates, coverage, exclusions)
//! - [`services`]: pure domain computations (business-hours classification)
//! - [`errors`]: the domain error taxonomy

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
