//! # Infrastructure Layer
//!
//! Adapters for persistence and runtime configuration.

pub mod persistence;
pub mod settings;
