use serde_json::Value;

/// Everything needed to render a mock data module.
///
/// The emitter decides the concrete syntax; this only carries the choices.
#[derive(Debug, Clone, PartialEq)]
pub struct MockModule {
    /// Declared type of the data constant.
    pub type_name: String,
    /// Exported accessor name.
    pub function_name: String,
    /// Module the type is imported from.
    pub types_import: String,
    /// Module `BaseApiResponse` is imported from when wrapped.
    pub response_import: String,
    /// File name of the JSON sample, shown in the header.
    pub source_name: String,
    pub data: Value,
    /// Accessor resolves after a delay instead of returning directly.
    pub asynchronous: bool,
    /// Accessor returns the data inside a success response envelope.
    pub wrapped: bool,
}

impl MockModule {
    pub fn new(
        type_name: impl Into<String>,
        function_name: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            function_name: function_name.into(),
            types_import: String::new(),
            response_import: String::new(),
            source_name: String::new(),
            data,
            asynchronous: true,
            wrapped: true,
        }
    }

    pub fn with_imports(
        mut self,
        types_import: impl Into<String>,
        response_import: impl Into<String>,
    ) -> Self {
        self.types_import = types_import.into();
        self.response_import = response_import.into();
        self
    }

    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    pub fn asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
    }

    pub fn wrapped(mut self, wrapped: bool) -> Self {
        self.wrapped = wrapped;
        self
    }
}
