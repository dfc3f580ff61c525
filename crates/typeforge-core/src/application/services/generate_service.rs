//! Generate Service - types, mock modules and API services.
//!
//! Each use case follows the same shape:
//! 1. Read inputs through the `Filesystem` port
//! 2. Run the domain logic
//! 3. Render through the `CodeEmitter` port
//! 4. Write the result when an output path was requested

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CodeEmitter, Filesystem},
    },
    domain::{MockModule, ServiceSpec, infer_declarations, relative_import},
    error::TypeforgeResult,
};

/// Infer declarations from a JSON sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesRequest {
    pub input: PathBuf,
    pub type_name: String,
    /// Written when set, otherwise the content is only returned.
    pub output: Option<PathBuf>,
}

/// Build a mock data module from a JSON sample and its types file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub input: PathBuf,
    pub types_file: PathBuf,
    pub type_name: String,
    pub function_name: String,
    pub output: Option<PathBuf>,
    pub asynchronous: bool,
    pub wrapped: bool,
    /// Types import used when there is no output path to resolve against.
    pub default_types_import: String,
    pub response_import: String,
}

/// Render an API-service class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub spec: ServiceSpec,
    pub output: Option<PathBuf>,
    /// Replace an existing output file.
    pub force: bool,
}

/// Result of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Where the content was written, if anywhere.
    pub path: Option<PathBuf>,
    pub content: String,
    /// Declarations emitted; zero for mock and service modules.
    pub declaration_count: usize,
}

/// Code generation use cases.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    emitter: Box<dyn CodeEmitter>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, emitter: Box<dyn CodeEmitter>) -> Self {
        Self {
            filesystem,
            emitter,
        }
    }

    /// Infer and render declarations for a JSON sample.
    #[instrument(
        skip_all,
        fields(input = %request.input.display(), type_name = %request.type_name)
    )]
    pub fn types(&self, request: &TypesRequest) -> TypeforgeResult<GeneratedArtifact> {
        let value = self.read_json(&request.input)?;
        let declarations = infer_declarations(&value, &request.type_name)?;
        info!(count = declarations.len(), "Declarations inferred");

        let content = self.emitter.declarations(&declarations);
        if let Some(path) = &request.output {
            self.write_output(path, &content, true)?;
        }

        Ok(GeneratedArtifact {
            path: request.output.clone(),
            content,
            declaration_count: declarations.len(),
        })
    }

    /// Render a mock data module typed by an existing declaration.
    #[instrument(
        skip_all,
        fields(
            input = %request.input.display(),
            types = %request.types_file.display(),
            type_name = %request.type_name
        )
    )]
    pub fn mock(&self, request: &MockRequest) -> TypeforgeResult<GeneratedArtifact> {
        self.ensure_declared(&request.types_file, &request.type_name)?;
        let data = self.read_json(&request.input)?;

        let types_import = match &request.output {
            Some(output) => relative_import(output, &request.types_file),
            None => request.default_types_import.clone(),
        };
        debug!(%types_import, "Resolved types import");

        let source_name = request
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let module = MockModule::new(&request.type_name, &request.function_name, data)
            .with_imports(types_import, &request.response_import)
            .with_source(source_name)
            .asynchronous(request.asynchronous)
            .wrapped(request.wrapped);

        let content = self.emitter.mock_module(&module);
        if let Some(path) = &request.output {
            self.write_output(path, &content, true)?;
        }
        info!("Mock module generated");

        Ok(GeneratedArtifact {
            path: request.output.clone(),
            content,
            declaration_count: 0,
        })
    }

    /// Validate and render an API-service class.
    #[instrument(skip_all, fields(class_name = %request.spec.class_name))]
    pub fn service(&self, request: &ServiceRequest) -> TypeforgeResult<GeneratedArtifact> {
        request.spec.validate()?;

        let content = self.emitter.service_module(&request.spec);
        if let Some(path) = &request.output {
            self.write_output(path, &content, request.force)?;
        }
        info!(methods = request.spec.methods.len(), "Service generated");

        Ok(GeneratedArtifact {
            path: request.output.clone(),
            content,
            declaration_count: 0,
        })
    }

    /// Load a service definition from a `.json` or TOML manifest.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_manifest(&self, path: &Path) -> TypeforgeResult<ServiceSpec> {
        let text = self.filesystem.read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&text).map_err(|e| e.to_string())
        } else {
            toml::from_str(&text).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| {
            ApplicationError::InvalidManifest {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        })
    }

    fn read_json(&self, path: &Path) -> TypeforgeResult<Value> {
        let text = self.filesystem.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            ApplicationError::InvalidJson {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// The types file must exist and declare `type_name`.
    fn ensure_declared(&self, types_file: &Path, type_name: &str) -> TypeforgeResult<()> {
        if !self.filesystem.exists(types_file) {
            return Err(ApplicationError::FileNotFound {
                path: types_file.to_path_buf(),
            }
            .into());
        }

        let source = self.filesystem.read_to_string(types_file)?;
        let declarations = self.emitter.read_declarations(&source)?;
        if declarations.iter().any(|d| d.name == type_name) {
            Ok(())
        } else {
            Err(ApplicationError::TypeNotDeclared {
                type_name: type_name.to_string(),
                path: types_file.to_path_buf(),
            }
            .into())
        }
    }

    fn write_output(&self, path: &Path, content: &str, overwrite: bool) -> TypeforgeResult<()> {
        if !overwrite && self.filesystem.exists(path) {
            return Err(ApplicationError::OutputExists {
                path: path.to_path_buf(),
            }
            .into());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "Output written");
        Ok(())
    }
}
