//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Input file is not valid JSON.
    #[error("Invalid JSON in {}: {reason}", path.display())]
    InvalidJson { path: PathBuf, reason: String },

    /// A required input file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Output file exists and overwriting was not allowed.
    #[error("Output already exists at {}", path.display())]
    OutputExists { path: PathBuf },

    /// The types file has no declaration with the requested name.
    #[error("Type '{type_name}' is not declared in {}", path.display())]
    TypeNotDeclared { type_name: String, path: PathBuf },

    /// Service manifest could not be parsed.
    #[error("Invalid service manifest {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    /// In-memory state lock was poisoned.
    #[error("Filesystem state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidJson { path, .. } => vec![
                format!("Check that {} contains a single JSON document", path.display()),
                "Validate it with a JSON linter".into(),
            ],
            Self::FileNotFound { path } => vec![
                format!("Expected a file at: {}", path.display()),
                "Check the path and try again".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::OutputExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite".into(),
                "Or choose a different output path with -o".into(),
            ],
            Self::TypeNotDeclared { type_name, path } => vec![
                format!("No `export interface {type_name}` in {}", path.display()),
                "Generate it first with `typeforge types`".into(),
            ],
            Self::InvalidManifest { .. } => vec![
                "Service manifests are TOML (.toml) or JSON (.json) files".into(),
                "Required keys: class_name, base_path, methods".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidJson { .. } | Self::InvalidManifest { .. } => ErrorCategory::Malformed,
            Self::FileNotFound { .. } | Self::TypeNotDeclared { .. } => ErrorCategory::NotFound,
            Self::OutputExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
