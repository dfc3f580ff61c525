//! `Filesystem` port implementations.
//!
//! [`LocalFilesystem`] backs the CLI; [`MemoryFilesystem`] keeps generation
//! and switching testable without touching disk.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
