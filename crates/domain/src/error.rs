//! Unified error types for the domain layer
//!
//! Provides a common error type usable across all domain operations,
//! enabling consistent error handling without forcing callers to use
//! String or anyhow.

use thiserror::Error;

use crate::value_objects::ChallengeParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }
}

impl From<ChallengeParseError> for DomainError {
    fn from(e: ChallengeParseError) -> Self {
        Self::Parse(e.to_string())
    }
}
