//! Error types for port operations.

/// Host-boundary operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// Document not found - includes the reference for actionable messages.
    #[error("Document not found: {reference}")]
    NotFound { reference: String },

    /// Underlying storage or I/O failed - includes operation name for tracing.
    #[error("I/O error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The output window could not be opened (popup blocker or similar).
    /// Surfaced as a user-visible warning, not a pipeline failure.
    #[error("Output blocked: {0}")]
    Blocked(String),

    /// A required host capability is not initialized yet.
    #[error("Host API unavailable: {0}")]
    Unavailable(String),
}

impl PortError {
    /// Create a NotFound error for a document reference.
    pub fn not_found(reference: impl ToString) -> Self {
        Self::NotFound {
            reference: reference.to_string(),
        }
    }

    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a Blocked error.
    pub fn blocked(message: impl ToString) -> Self {
        Self::Blocked(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Blocked error.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}
