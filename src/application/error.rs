//! # Application Errors
//!
//! Error type for the application service layer.

use crate::domain::DomainError;
use crate::infrastructure::persistence::traits::RepositoryError;
use thiserror::Error;

/// Error type for application service operations.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain rule violation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Persistence failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid request input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced resource does not exist.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Type of resource.
        resource_type: &'static str,
        /// Resource identifier.
        id: String,
    },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the error is caused by bad request input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }
}

/// Result type for application service operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_client_errors() {
        let err = ApplicationError::from(DomainError::ArithmeticOverflow);
        assert!(err.is_client_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn repository_errors_are_not_client_errors() {
        let err = ApplicationError::from(RepositoryError::connection("refused"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn not_found_formats_resource_and_id() {
        let err = ApplicationError::not_found("Supplier", "sup-1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Supplier not found: sup-1");
    }
}
