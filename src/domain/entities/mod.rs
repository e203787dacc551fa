//! # Entities
//!
//! Records with identity managed by the rate catalog.
//!
//! - [`Supplier`]: a verified service supplier and its capabilities
//! - [`Rate`]: an hourly rate record keyed by supplier, scope, service
//!   type, and service level
//! - [`CoverageCountry`] / [`PriorityCity`]: per-supplier serviceable
//!   location declarations
//! - [`ServiceExclusion`] / [`ResponseTimeExclusion`]: supplier opt-outs
//!   that shrink the completion denominator
//! - [`JobRequest`]: a validated incoming job descriptor

pub mod coverage;
pub mod exclusion;
pub mod job_request;
pub mod rate;
pub mod supplier;

pub use coverage::{CoverageCountry, PriorityCity};
pub use exclusion::{ExclusionSet, ResponseTimeExclusion, ServiceExclusion};
pub use job_request::JobRequest;
pub use rate::{Rate, RateKey};
pub use supplier::Supplier;
