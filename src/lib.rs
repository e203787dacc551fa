//! # On-Site Pricing
//!
//! Rate resolution and pricing engine for a marketplace that matches
//! on-site technical work with suppliers publishing hourly rates per
//! location, service type, and response-time tier.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layering:
//!
//! - [`domain`]: value objects, entities, and pure services (money,
//!   locations, business-hours classification)
//! - [`application`]: orchestration services over repository ports
//!   (resolution, availability, pricing, stats, adjustments, analytics)
//! - [`infrastructure`]: persistence adapters (in-memory and
//!   PostgreSQL) and runtime settings
//! - [`api`]: the REST transport
//!
//! # Example
//!
//! ```
//! use onsite_pricing::domain::value_objects::money::UsdCents;
//!
//! let rate = UsdCents::from_dollars(100).unwrap();
//! assert_eq!(rate.cents(), 10_000);
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
