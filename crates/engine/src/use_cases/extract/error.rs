//! Extraction operation errors.

use crate::infrastructure::ports::PortError;

/// Errors that can occur while extracting a sheet record.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported document kind for {operation}: expected {expected}")]
    UnsupportedKind {
        operation: &'static str,
        expected: &'static str,
    },

    #[error("Host API error: {0}")]
    Port(#[from] PortError),
}

impl ExtractError {
    pub fn unsupported_kind(operation: &'static str, expected: &'static str) -> Self {
        Self::UnsupportedKind {
            operation,
            expected,
        }
    }
}
