//! Unified error handling for typeforge core.
//!
//! Wraps domain and application errors behind one type with user-actionable
//! suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for typeforge core operations.
#[derive(Debug, Error, Clone)]
pub enum TypeforgeError {
    /// Errors from the domain layer (malformed input, invalid definitions).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, missing files).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TypeforgeError {
    /// Hints shown under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Review the values passed to the generator".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in typeforge".into(),
                "Please report this issue at: https://github.com/cosecruz/typeforge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Malformed => ErrorCategory::Malformed,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Malformed,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type TypeforgeResult<T> = Result<T, TypeforgeError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn domain_categories_are_mapped() {
        let err = TypeforgeError::from(DomainError::MalformedMarkers {
            line: 3,
            reason: "x".into(),
        });
        assert_eq!(err.category(), ErrorCategory::Malformed);

        let err = TypeforgeError::from(DomainError::InvalidRootShape { found: "array" });
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = TypeforgeError::from(ApplicationError::FileNotFound {
            path: PathBuf::from("a.json"),
        });
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("a.json"));
    }
}
