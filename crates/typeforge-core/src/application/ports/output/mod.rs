//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `typeforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Declaration, MockModule, ServiceSpec};
use crate::error::TypeforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `typeforge_adapters::filesystem::LocalFilesystem` (production)
/// - `typeforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole UTF-8 file.
    ///
    /// A missing file is reported as `ApplicationError::FileNotFound`.
    fn read_to_string(&self, path: &Path) -> TypeforgeResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> TypeforgeResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TypeforgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Every regular file below `root`, sorted, skipping hidden directories
    /// and directories named in `skip_dirs`.
    fn walk_files(&self, root: &Path, skip_dirs: &[String]) -> TypeforgeResult<Vec<PathBuf>>;
}

/// Port for the generated target language.
///
/// Implemented by:
/// - `typeforge_adapters::emitter::TypeScriptEmitter`
#[cfg_attr(test, mockall::automock)]
pub trait CodeEmitter: Send + Sync {
    /// Render declarations in the given order.
    fn declarations(&self, declarations: &[Declaration]) -> String;

    /// Render a mock data module.
    fn mock_module(&self, module: &MockModule) -> String;

    /// Render an API-service class.
    fn service_module(&self, spec: &ServiceSpec) -> String;

    /// Parse declarations previously rendered by [`CodeEmitter::declarations`].
    fn read_declarations(&self, source: &str) -> TypeforgeResult<Vec<Declaration>>;
}
