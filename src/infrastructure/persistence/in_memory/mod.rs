//! # In-Memory Persistence
//!
//! Thread-safe `HashMap` implementations of the repository ports.
//!
//! Suitable for unit tests and local runs without database dependencies.

pub mod coverage_repository;
pub mod exclusion_repository;
pub mod rate_repository;
pub mod supplier_repository;

pub use coverage_repository::InMemoryCoverageRepository;
pub use exclusion_repository::InMemoryExclusionRepository;
pub use rate_repository::InMemoryRateRepository;
pub use supplier_repository::InMemorySupplierRepository;
