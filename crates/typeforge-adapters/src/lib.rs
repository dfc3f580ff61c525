//! Infrastructure adapters for typeforge.
//!
//! This crate implements the ports defined in `typeforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod emitter;
pub mod filesystem;

// Re-export commonly used adapters
pub use emitter::{EmitterSettings, TypeScriptEmitter};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
