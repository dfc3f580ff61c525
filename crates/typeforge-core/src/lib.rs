//! Domain and application layers of typeforge.
//!
//! Typeforge infers TypeScript declarations from JSON samples, renders mock
//! data and API-service modules, and flips generated files between their
//! mock and live variants.
//!
//! Dependencies point inwards:
//!
//! ```text
//!   typeforge-cli ──► application (GenerateService, SwitchService)
//!                          │
//!                          ├──► domain (Shape, Declaration, markers)
//!                          │
//!                          └──► ports (Filesystem, CodeEmitter)
//!                                  ▲
//!   typeforge-adapters ────────────┘ (LocalFilesystem, TypeScriptEmitter)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use typeforge_core::domain::{infer_declarations, markers};
//!
//! let decls = infer_declarations(&json!({"user": {"id": 1}}), "Response").unwrap();
//! assert_eq!(decls.len(), 2);
//!
//! let live = markers::activate_live("// DUMMY_START\nmock();\n// DUMMY_END").unwrap();
//! assert_eq!(live, "// DUMMY_START\n// mock();\n// DUMMY_END");
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// The types most callers need, in one import.
pub mod prelude {
    pub use crate::application::{
        GenerateService, GeneratedArtifact, MockRequest, ServiceRequest, SwitchReport,
        SwitchService, TypesRequest,
        ports::{CodeEmitter, Filesystem},
    };
    pub use crate::domain::{
        Declaration, MockModule, Region, ServiceSpec, Shape, SwitchMode, infer_declarations,
    };
    pub use crate::error::{TypeforgeError, TypeforgeResult};
}
