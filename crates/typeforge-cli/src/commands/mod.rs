//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core requests, wire the adapters, and
//! report results. No generation logic lives here.

use std::path::{Path, PathBuf};

use typeforge_adapters::{LocalFilesystem, TypeScriptEmitter};
use typeforge_core::application::{GeneratedArtifact, GenerateService};
use typeforge_core::domain::is_identifier;

use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod init;
pub mod mock;
pub mod service;
pub mod switch;
pub mod types;

/// Generation service backed by the local filesystem.
fn generate_service(config: &AppConfig) -> GenerateService {
    GenerateService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(TypeScriptEmitter::new(config.emitter_settings())),
    )
}

/// Type names become interface names: identifiers starting uppercase.
pub fn validate_type_name(name: &str) -> CliResult<()> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if !name.starts_with(|c: char| c.is_uppercase()) {
        "must start with an uppercase letter"
    } else if !is_identifier(name) {
        "must only contain letters, digits, '_' or '$'"
    } else {
        return Ok(());
    };
    Err(CliError::InvalidName {
        kind: "type",
        name: name.to_string(),
        reason: reason.into(),
    })
}

pub fn validate_function_name(name: &str) -> CliResult<()> {
    if is_identifier(name) {
        return Ok(());
    }
    Err(CliError::InvalidName {
        kind: "function",
        name: name.to_string(),
        reason: "must be a valid identifier".into(),
    })
}

/// `<input dir>/<input stem><suffix>`.
fn beside_input(input: &Path, suffix: &str) -> CliResult<PathBuf> {
    let stem = input.file_stem().ok_or_else(|| CliError::InvalidInput {
        message: format!("'{}' has no file name to derive an output from", input.display()),
        source: None,
    })?;
    let name = format!("{}{suffix}", stem.to_string_lossy());
    Ok(match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    })
}

/// Print generated content to stdout, or confirm where it was written.
fn report_artifact(artifact: &GeneratedArtifact, what: &str, output: &OutputManager) -> CliResult<()> {
    let Some(path) = &artifact.path else {
        output.emit(&artifact.content)?;
        return Ok(());
    };

    if output.format() == OutputFormat::Json {
        output.json(&serde_json::json!({
            "path": path,
            "declarations": artifact.declaration_count,
            "bytes": artifact.content.len(),
        }))?;
        return Ok(());
    }

    output.success(&format!("{what} generated"))?;
    output.file("wrote", path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_must_be_uppercase_identifiers() {
        assert!(validate_type_name("User").is_ok());
        assert!(validate_type_name("ApiResponse2").is_ok());
        assert!(validate_type_name("Ñandú").is_ok());
        assert!(validate_type_name("").is_err());
        assert!(validate_type_name("user").is_err());
        assert!(validate_type_name("User-Profile").is_err());
        assert!(matches!(
            validate_type_name("9Lives"),
            Err(CliError::InvalidName { kind: "type", .. })
        ));
    }

    #[test]
    fn function_names_must_be_identifiers() {
        assert!(validate_function_name("getDummyUser").is_ok());
        assert!(validate_function_name("_load$").is_ok());
        assert!(validate_function_name("get-user").is_err());
        assert!(validate_function_name("2fast").is_err());
    }

    #[test]
    fn beside_input_replaces_the_extension() {
        assert_eq!(
            beside_input(Path::new("samples/user.json"), ".d.ts").unwrap(),
            PathBuf::from("samples/user.d.ts")
        );
        assert_eq!(
            beside_input(Path::new("user.json"), ".dummy.ts").unwrap(),
            PathBuf::from("user.dummy.ts")
        );
        assert!(matches!(
            beside_input(Path::new(".."), ".d.ts"),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
