//! # Domain Errors
//!
//! Error types for domain rule violations.
//!
//! These errors represent invalid inputs and broken invariants detected
//! before any storage access: malformed identifiers, out-of-range values,
//! and temporal inputs that cannot be resolved in the site timezone.

use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Job duration outside the accepted range.
    #[error("invalid duration: {minutes} minutes (must be between {min} and {max})")]
    InvalidDuration {
        /// Requested duration in minutes.
        minutes: u32,
        /// Minimum accepted duration.
        min: u32,
        /// Maximum accepted duration.
        max: u32,
    },

    /// Country code is not a two-letter ISO alpha-2 code.
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),

    /// Monetary amount is negative.
    #[error("negative amount: {0} cents")]
    NegativeAmount(i64),

    /// Arithmetic overflow during a monetary computation.
    #[error("monetary arithmetic overflow")]
    ArithmeticOverflow,

    /// Local wall-clock time does not exist in the site timezone (DST gap).
    #[error("nonexistent local time: {0}")]
    NonexistentLocalTime(String),
}

impl DomainError {
    /// Creates an invalid duration error.
    #[must_use]
    pub fn invalid_duration(minutes: u32, min: u32, max: u32) -> Self {
        Self::InvalidDuration { minutes, min, max }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_duration_display() {
        let err = DomainError::invalid_duration(60, 120, 960);
        assert!(err.to_string().contains("60"));
        assert!(err.to_string().contains("120"));
        assert!(err.to_string().contains("960"));
    }

    #[test]
    fn invalid_country_code_display() {
        let err = DomainError::InvalidCountryCode("USA".to_string());
        assert!(err.to_string().contains("USA"));
    }

    #[test]
    fn nonexistent_local_time_display() {
        let err = DomainError::NonexistentLocalTime("2024-03-10T02:30:00".to_string());
        assert!(err.to_string().contains("02:30"));
    }
}
