// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports collect them per file)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Shape Errors
    // ========================================================================
    #[error("root JSON value must be an object, found {found}")]
    InvalidRootShape { found: &'static str },

    // ========================================================================
    // Marker Errors
    // ========================================================================
    #[error("malformed markers at line {line}: {reason}")]
    MalformedMarkers { line: usize, reason: String },

    // ========================================================================
    // Declaration Errors
    // ========================================================================
    #[error("malformed declarations at line {line}: {reason}")]
    MalformedDeclarations { line: usize, reason: String },

    // ========================================================================
    // Service Errors
    // ========================================================================
    #[error("invalid service definition: {0}")]
    InvalidServiceSpec(String),

    #[error("method '{name}' is defined more than once")]
    DuplicateMethod { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRootShape { found } => vec![
                format!("The sample's top-level value is {found}"),
                "Wrap the sample in an object, e.g. {\"items\": [...]}".into(),
            ],
            Self::MalformedMarkers { line, .. } => vec![
                format!("Check the marker pair around line {line}"),
                "Every // DUMMY_START needs a // DUMMY_END (same for LIVE)".into(),
                "Regions cannot be nested".into(),
            ],
            Self::MalformedDeclarations { line, .. } => vec![
                format!("Line {line} is not a generated interface member"),
                "Regenerate the types file with `typeforge types`".into(),
            ],
            Self::InvalidServiceSpec(msg) => vec![
                "Check the service manifest".into(),
                format!("Details: {msg}"),
            ],
            Self::DuplicateMethod { name } => {
                vec![format!("Rename or remove one of the '{name}' methods")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRootShape { .. }
            | Self::InvalidServiceSpec(_)
            | Self::DuplicateMethod { .. } => ErrorCategory::Validation,
            Self::MalformedMarkers { .. } | Self::MalformedDeclarations { .. } => {
                ErrorCategory::Malformed
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Malformed,
}
