//! Core domain layer for typeforge.
//!
//! Pure functions over in-memory values. All I/O and target-language syntax
//! live behind the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Deterministic**: Same input, same output, byte for byte
//!
// Public API - what the world sees
pub mod declaration;
pub mod error;
pub mod import_path;
pub mod markers;
pub mod mock;
pub mod service;
pub mod shape;

// Re-exports for convenience
pub use declaration::{
    Declaration, FieldDecl, FieldType, deduplicate, infer_declarations, resolve_signatures,
};
pub use error::{DomainError, ErrorCategory};
pub use import_path::relative_import;
pub use markers::{Region, RegionTag, SwitchMode};
pub use mock::MockModule;
pub use service::{HttpMethod, ServiceMethod, ServiceSpec, is_identifier};
pub use shape::{PrimitiveKind, Shape, ShapeKind, analyze};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // ========================================================================
    // Shape → Declaration
    // ========================================================================

    #[test]
    fn every_reference_resolves() {
        let value = json!({
            "id": 1,
            "owner": {"name": "a", "address": {"zip": "1"}},
            "members": [{"name": "b", "address": {"zip": "2"}}],
            "tags": ["x"]
        });
        let decls = infer_declarations(&value, "Project").unwrap();

        let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
        for decl in &decls {
            for dep in decl.dependencies() {
                assert!(names.contains(&dep), "{dep} is not declared");
            }
        }
        // owner and members share a shape
        assert_eq!(names, ["ProjectOwnerAddress", "ProjectOwner", "Project"]);
    }

    #[test]
    fn root_declaration_is_last() {
        let decls = infer_declarations(&json!({"a": {"b": 1}}), "Root").unwrap();
        assert_eq!(decls.last().map(|d| d.name.as_str()), Some("Root"));
    }

    // ========================================================================
    // Markers
    // ========================================================================

    #[test]
    fn switch_mode_dispatches() {
        let text = "// DUMMY_START\nm();\n// DUMMY_END";
        assert_eq!(
            markers::transform(text, SwitchMode::Live).unwrap(),
            "// DUMMY_START\n// m();\n// DUMMY_END"
        );
        assert_eq!(markers::transform(text, SwitchMode::Strip).unwrap(), "");
    }

    #[test]
    fn malformed_markers_are_categorized() {
        let err = markers::strip("// LIVE_START").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Malformed);
        assert!(!err.suggestions().is_empty());
    }
}
