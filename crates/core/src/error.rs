//! Core Error Types
//!
//! Defines the foundational error types used across the Turnlens workspace.
//! These error types are dependency-free (only thiserror + serde_json + std)
//! to keep the core crate lightweight.
//!
//! Analysis itself never fails: every numeric edge case resolves to a
//! documented default value. Errors exist for exactly two situations:
//! a degraded optional capability (recorded, never fatal) and a report
//! export that cannot be written (always propagated).

use thiserror::Error;

/// Core error type for the Turnlens workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// File I/O errors (report export)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An optional sub-analyzer capability failed to initialize
    #[error("Capability error: {0}")]
    Capability(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a capability error
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_error_display() {
        let err = CoreError::capability("probe failed: no backend");
        assert_eq!(err.to_string(), "Capability error: probe failed: no backend");
    }

    #[test]
    fn test_error_conversion() {
        let err = CoreError::internal("lock poisoned");
        let msg: String = err.into();
        assert!(msg.contains("Internal error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
    }
}
