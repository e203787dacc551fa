//! # Application Layer
//!
//! Service orchestration over the domain model and persistence ports.
//!
//! Each service owns one read or write surface of the pricing core and is
//! constructed with `Arc`-wrapped repository ports, so the same service
//! instances can back both the REST handlers and the test harnesses.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
