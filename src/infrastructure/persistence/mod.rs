//! # Persistence
//!
//! Repository ports and their adapters.
//!
//! - [`traits`]: port definitions and [`RepositoryError`]
//! - [`in_memory`]: `HashMap`-backed adapters for tests and local runs
//! - [`postgres`]: `sqlx`-backed adapters for production

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    CoverageRepository, ExclusionRepository, RateRepository, RepositoryError, RepositoryResult,
    SupplierRepository,
};
