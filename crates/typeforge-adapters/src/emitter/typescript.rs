//! TypeScript code emitter.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument};
use typeforge_core::{
    application::ports::CodeEmitter,
    domain::{
        Declaration, FieldType, HttpMethod, MockModule, ServiceMethod, ServiceSpec,
        markers::{self, LIVE_END, LIVE_START, MOCK_END, MOCK_START},
        service::ID_PLACEHOLDER,
    },
    error::TypeforgeResult,
};

use super::{literal, reader};

const RECORD_ARRAY: &str = "Record<string, unknown>[]";
const MOCK_DELAY_MS: u32 = 500;

/// Module paths imported by generated service classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterSettings {
    pub base_service_import: String,
    pub http_client_import: String,
    pub response_import: String,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            base_service_import: "@/services/api/base".into(),
            http_client_import: "@/services/http/client".into(),
            response_import: "@/types/api/api-general".into(),
        }
    }
}

/// Emits TypeScript declarations, mock modules and API-service classes.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptEmitter {
    settings: EmitterSettings,
}

impl TypeScriptEmitter {
    pub fn new(settings: EmitterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }
}

impl CodeEmitter for TypeScriptEmitter {
    #[instrument(skip_all, fields(count = declarations.len()))]
    fn declarations(&self, declarations: &[Declaration]) -> String {
        if declarations.is_empty() {
            return String::new();
        }

        let blocks: Vec<String> = declarations.iter().map(render_declaration).collect();
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    #[instrument(skip_all, fields(type_name = %module.type_name))]
    fn mock_module(&self, module: &MockModule) -> String {
        render_mock(module)
    }

    #[instrument(skip_all, fields(class_name = %spec.class_name))]
    fn service_module(&self, spec: &ServiceSpec) -> String {
        render_service(spec, &self.settings)
    }

    fn read_declarations(&self, source: &str) -> TypeforgeResult<Vec<Declaration>> {
        let declarations = reader::read_declarations(source)?;
        debug!(count = declarations.len(), "Read declarations");
        Ok(declarations)
    }
}

// ── Declarations ─────────────────────────────────────────────────────────────

fn render_declaration(decl: &Declaration) -> String {
    if decl.fields.is_empty() {
        return format!("export interface {} {{}}", decl.name);
    }

    let mut out = format!("export interface {} {{\n", decl.name);
    for field in &decl.fields {
        let optional = if field.optional { "?" } else { "" };
        out.push_str(&format!(
            "  {}{optional}: {};\n",
            literal::member_name(&field.name),
            render_type(&field.ty)
        ));
    }
    out.push('}');
    out
}

fn render_type(ty: &FieldType) -> String {
    let array = if ty.is_array() { "[]" } else { "" };
    match ty {
        FieldType::Primitive { kind, .. } => format!("{kind}{array}"),
        FieldType::Reference { name, .. } => format!("{name}{array}"),
        FieldType::RecordArray => RECORD_ARRAY.into(),
        FieldType::Unknown { .. } => format!("unknown{array}"),
        FieldType::Opaque { text } => text.clone(),
    }
}

// ── Mock modules ─────────────────────────────────────────────────────────────

fn render_mock(module: &MockModule) -> String {
    let MockModule {
        type_name,
        function_name,
        ..
    } = module;

    let mut lines: Vec<String> = vec![
        "/**".into(),
        format!(" * Dummy data for {type_name}"),
        format!(" * Generated from: {}", module.source_name),
        " *".into(),
        " * This file is auto-generated. Do not edit manually.".into(),
        " */".into(),
        String::new(),
        format!("import {{ {type_name} }} from {};", literal::quote(&module.types_import)),
    ];
    if module.wrapped {
        lines.push(format!(
            "import {{ BaseApiResponse }} from {};",
            literal::quote(&module.response_import)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "const DUMMY_DATA: {type_name} = {};",
        literal::format_value(&module.data, 0)
    ));
    lines.push(String::new());

    let returns = match (module.asynchronous, module.wrapped) {
        (true, true) => format!("Promise with BaseApiResponse containing {type_name}"),
        (true, false) => format!("Promise with {type_name}"),
        (false, true) => format!("BaseApiResponse containing {type_name}"),
        (false, false) => type_name.clone(),
    };
    lines.extend([
        "/**".into(),
        format!(" * Get dummy {type_name} data"),
        " * @param id - Optional ID parameter".into(),
        format!(" * @returns {returns}"),
        " */".into(),
    ]);

    let envelope = [
        "code: 200,",
        "status: 'success',",
        "message: 'Data retrieved successfully',",
        "data: DUMMY_DATA,",
    ];
    match (module.asynchronous, module.wrapped) {
        (true, true) => {
            lines.push(format!(
                "export async function {function_name}(id?: number): Promise<BaseApiResponse<{type_name}>> {{"
            ));
            lines.push("  return new Promise((resolve) => {".into());
            lines.push("    setTimeout(() => {".into());
            lines.push("      resolve({".into());
            lines.extend(envelope.iter().map(|line| format!("        {line}")));
            lines.push("      });".into());
            lines.push(format!("    }}, {MOCK_DELAY_MS});"));
            lines.push("  });".into());
        }
        (true, false) => {
            lines.push(format!(
                "export async function {function_name}(id?: number): Promise<{type_name}> {{"
            ));
            lines.push("  return new Promise((resolve) => {".into());
            lines.push("    setTimeout(() => {".into());
            lines.push("      resolve(DUMMY_DATA);".into());
            lines.push(format!("    }}, {MOCK_DELAY_MS});"));
            lines.push("  });".into());
        }
        (false, true) => {
            lines.push(format!(
                "export function {function_name}(id?: number): BaseApiResponse<{type_name}> {{"
            ));
            lines.push("  return {".into());
            lines.extend(envelope.iter().map(|line| format!("    {line}")));
            lines.push("  };".into());
        }
        (false, false) => {
            lines.push(format!(
                "export function {function_name}(id?: number): {type_name} {{"
            ));
            lines.push("  return DUMMY_DATA;".into());
        }
    }
    lines.push("}".into());
    lines.push(String::new());

    lines.join("\n")
}

// ── Service classes ──────────────────────────────────────────────────────────

fn render_service(spec: &ServiceSpec, settings: &EmitterSettings) -> String {
    let mut lines = service_imports(spec, settings);
    lines.push(String::new());

    lines.push(format!(
        "export class {} extends BaseApiService<any, null, null> {{",
        spec.class_name
    ));
    lines.push("  constructor(basePath: string) {".into());
    lines.push("    super(basePath);".into());
    lines.push("  }".into());

    for method in &spec.methods {
        lines.push(String::new());
        lines.extend(service_method(method));
    }

    lines.push("}".into());
    lines.push(String::new());
    lines.push(format!(
        "export const {} = new {}({});",
        spec.instance_name(),
        spec.class_name,
        literal::quote(&spec.base_path)
    ));
    lines.push(String::new());

    lines.join("\n")
}

fn service_imports(spec: &ServiceSpec, settings: &EmitterSettings) -> Vec<String> {
    let mut lines = vec![
        "import axios from 'axios';".to_string(),
        format!(
            "import {{ BaseApiService }} from {};",
            literal::quote(&settings.base_service_import)
        ),
        format!(
            "import {{ BaseApiResponse }} from {};",
            literal::quote(&settings.response_import)
        ),
        format!(
            "import {{ httpClient }} from {};",
            literal::quote(&settings.http_client_import)
        ),
    ];

    let mut types: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    let mut mocks: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for method in &spec.methods {
        if let Some(path) = method.response_type_path.as_deref() {
            let names = types.entry(path).or_default();
            names.insert(&method.response_type);
            if let Some(body) = method.request_body_type.as_deref() {
                names.insert(body);
            }
        }
        if let (Some(function), Some(path)) = (
            method.mock_function.as_deref(),
            method.mock_function_path.as_deref(),
        ) {
            mocks.entry(path).or_default().insert(function);
        }
    }

    lines.extend(types.iter().map(|(path, names)| import_line(names, path)));
    if !mocks.is_empty() {
        lines.push(MOCK_START.into());
        lines.extend(mocks.iter().map(|(path, names)| import_line(names, path)));
        lines.push(MOCK_END.into());
    }
    lines
}

fn import_line(names: &IndexSet<&str>, path: &str) -> String {
    let names: Vec<&str> = names.iter().copied().collect();
    format!(
        "import {{ {} }} from {};",
        names.join(", "),
        literal::quote(path)
    )
}

fn service_method(method: &ServiceMethod) -> Vec<String> {
    let response = format!("BaseApiResponse<{}>", method.response_type);
    let body = method.body_type();

    let mut params = Vec::new();
    if method.takes_id() {
        params.push("id: number".to_string());
    }
    if let Some(body) = body {
        params.push(format!("data: {body}"));
    }

    let mut lines = vec![format!(
        "  async {}({}): Promise<{response} | undefined> {{",
        method.name,
        params.join(", ")
    )];

    if let Some(function) = &method.mock_function {
        let args = if method.takes_id() { "id" } else { "" };
        lines.push(format!("    {MOCK_START}"));
        lines.push(format!("    return await {function}({args});"));
        lines.push(format!("    {MOCK_END}"));
        lines.push(String::new());
    }

    let mut live = vec![
        "    try {".to_string(),
        format!("      const path = {};", endpoint_path(&method.endpoint)),
    ];
    if method.http_method == HttpMethod::Get {
        live.push(format!("      return await httpClient<{response}>(path);"));
    } else {
        live.push(format!("      return await httpClient<{response}>(path, {{"));
        live.push(format!("        method: '{}',", method.http_method));
        if body.is_some() {
            live.push("        data,".into());
        }
        live.push("      });".into());
    }
    live.extend([
        "    } catch (error) {".to_string(),
        format!("      if (axios.isAxiosError<{response}>(error)) {{"),
        "        return error.response?.data;".into(),
        "      }".into(),
        "      return undefined;".into(),
        "    }".into(),
    ]);

    lines.push(format!("    {LIVE_START}"));
    if method.mock_function.is_some() {
        lines.extend(live.iter().map(|line| markers::comment_out(line)));
    } else {
        lines.extend(live);
    }
    lines.push(format!("    {LIVE_END}"));
    lines.push("  }".into());
    lines
}

/// Template literal for the request path, relative to `this.basePath`.
fn endpoint_path(endpoint: &str) -> String {
    let separator = if endpoint.starts_with('/') { "" } else { "/" };
    let endpoint = endpoint.replace(ID_PLACEHOLDER, "${id}");
    format!("`${{this.basePath}}{separator}{endpoint}`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use typeforge_core::domain::{FieldDecl, PrimitiveKind, infer_declarations};

    fn method(name: &str, http_method: HttpMethod, endpoint: &str) -> ServiceMethod {
        ServiceMethod {
            name: name.into(),
            http_method,
            endpoint: endpoint.into(),
            request_body_type: None,
            response_type: "User".into(),
            response_type_path: Some("@/types/api/user".into()),
            mock_function: None,
            mock_function_path: None,
        }
    }

    #[test]
    fn renders_declarations() {
        let decls = vec![
            Declaration::new("Empty", vec![]),
            Declaration::new(
                "User",
                vec![
                    FieldDecl {
                        name: "id".into(),
                        ty: FieldType::Primitive {
                            kind: PrimitiveKind::Number,
                            is_array: false,
                        },
                        optional: false,
                    },
                    FieldDecl {
                        name: "tags".into(),
                        ty: FieldType::Unknown { is_array: true },
                        optional: true,
                    },
                    FieldDecl {
                        name: "x-rate".into(),
                        ty: FieldType::RecordArray,
                        optional: false,
                    },
                    FieldDecl {
                        name: "friends".into(),
                        ty: FieldType::Reference {
                            name: "Empty".into(),
                            is_array: true,
                        },
                        optional: false,
                    },
                ],
            ),
        ];
        let expected = "\
export interface Empty {}

export interface User {
  id: number;
  tags?: unknown[];
  'x-rate': Record<string, unknown>[];
  friends: Empty[];
}
";
        assert_eq!(TypeScriptEmitter::default().declarations(&decls), expected);
    }

    #[test]
    fn declarations_read_back_equal() {
        let value = json!({
            "id": 1,
            "nick": null,
            "2fa": true,
            "profile": {"bio": "x", "links": ["a"]},
            "posts": [{"title": "t"}],
            "tags": []
        });
        let decls = infer_declarations(&value, "User").unwrap();
        let emitter = TypeScriptEmitter::default();

        let source = emitter.declarations(&decls);
        assert_eq!(emitter.read_declarations(&source).unwrap(), decls);
    }

    #[test]
    fn non_ascii_names_read_back() {
        let value = json!({"ñame": {"v": 1}, "größe": 2});
        let decls = infer_declarations(&value, "Root").unwrap();
        assert_eq!(decls[0].name, "RootÑame");

        let emitter = TypeScriptEmitter::default();
        let source = emitter.declarations(&decls);
        assert!(source.contains("export interface RootÑame {"));
        assert!(source.contains("  größe: number;"));
        assert_eq!(emitter.read_declarations(&source).unwrap(), decls);
    }

    #[test]
    fn renders_async_wrapped_mock() {
        let module = MockModule::new("User", "getDummyUser", json!({"id": 1, "name": "Al"}))
            .with_imports("./user", "@/types/api/api-general")
            .with_source("user.json");

        let expected = "\
/**
 * Dummy data for User
 * Generated from: user.json
 *
 * This file is auto-generated. Do not edit manually.
 */

import { User } from './user';
import { BaseApiResponse } from '@/types/api/api-general';

const DUMMY_DATA: User = {
  id: 1,
  name: 'Al',
};

/**
 * Get dummy User data
 * @param id - Optional ID parameter
 * @returns Promise with BaseApiResponse containing User
 */
export async function getDummyUser(id?: number): Promise<BaseApiResponse<User>> {
  return new Promise((resolve) => {
    setTimeout(() => {
      resolve({
        code: 200,
        status: 'success',
        message: 'Data retrieved successfully',
        data: DUMMY_DATA,
      });
    }, 500);
  });
}
";
        assert_eq!(TypeScriptEmitter::default().mock_module(&module), expected);
    }

    #[test]
    fn sync_raw_mock_has_no_response_import() {
        let module = MockModule::new("User", "getUser", json!({}))
            .with_imports("./user", "@/types/api/api-general")
            .asynchronous(false)
            .wrapped(false);
        let out = TypeScriptEmitter::default().mock_module(&module);

        assert!(!out.contains("BaseApiResponse"));
        assert!(out.contains("const DUMMY_DATA: User = {};"));
        assert!(out.contains("export function getUser(id?: number): User {\n  return DUMMY_DATA;\n}\n"));
    }

    #[test]
    fn sync_wrapped_mock_returns_envelope() {
        let module = MockModule::new("User", "getUser", json!({}))
            .asynchronous(false);
        let out = TypeScriptEmitter::default().mock_module(&module);
        assert!(out.contains(
            "export function getUser(id?: number): BaseApiResponse<User> {\n  return {\n    code: 200,"
        ));
    }

    #[test]
    fn renders_service_without_mocks() {
        let spec = ServiceSpec {
            class_name: "UserService".into(),
            base_path: "/api/users".into(),
            methods: vec![method("getUser", HttpMethod::Get, "/{id}")],
        };
        let expected = "\
import axios from 'axios';
import { BaseApiService } from '@/services/api/base';
import { BaseApiResponse } from '@/types/api/api-general';
import { httpClient } from '@/services/http/client';
import { User } from '@/types/api/user';

export class UserService extends BaseApiService<any, null, null> {
  constructor(basePath: string) {
    super(basePath);
  }

  async getUser(id: number): Promise<BaseApiResponse<User> | undefined> {
    // LIVE_START
    try {
      const path = `${this.basePath}/${id}`;
      return await httpClient<BaseApiResponse<User>>(path);
    } catch (error) {
      if (axios.isAxiosError<BaseApiResponse<User>>(error)) {
        return error.response?.data;
      }
      return undefined;
    }
    // LIVE_END
  }
}

export const UserApi = new UserService('/api/users');
";
        assert_eq!(TypeScriptEmitter::default().service_module(&spec), expected);
    }

    #[test]
    fn mocked_service_switches_cleanly() {
        let mut create = method("createUser", HttpMethod::Post, "create");
        create.request_body_type = Some("NewUser".into());
        create.mock_function = Some("getDummyUser".into());
        create.mock_function_path = Some("@/dummy/user".into());
        let mut get = method("getUser", HttpMethod::Get, "/{id}");
        get.mock_function = Some("getDummyUser".into());
        get.mock_function_path = Some("@/dummy/user".into());

        let spec = ServiceSpec {
            class_name: "UserApiService".into(),
            base_path: "/api/users".into(),
            methods: vec![create, get],
        };
        let out = TypeScriptEmitter::default().service_module(&spec);

        assert!(out.contains("import { User, NewUser } from '@/types/api/user';"));
        assert!(out.contains("// DUMMY_START\nimport { getDummyUser } from '@/dummy/user';\n// DUMMY_END"));
        assert!(out.contains("async createUser(data: NewUser): Promise<BaseApiResponse<User> | undefined> {"));
        assert!(out.contains("    return await getDummyUser();"));
        assert!(out.contains("    return await getDummyUser(id);"));
        assert!(out.contains("      // const path = `${this.basePath}/create`;"));
        assert!(out.contains("export const UserApi = new UserApiService('/api/users');"));

        let live = markers::activate_live(&out).unwrap();
        assert!(live.contains("        method: 'POST',\n        data,"));
        assert!(live.contains("    // return await getDummyUser(id);"));
        assert_eq!(markers::activate_mock(&live).unwrap(), out);

        let stripped = markers::strip(&out).unwrap();
        for token in [MOCK_START, MOCK_END, LIVE_START, LIVE_END, "getDummyUser"] {
            assert!(!stripped.contains(token), "{token} survived strip");
        }
        assert!(stripped.contains("      return await httpClient<BaseApiResponse<User>>(path);"));
    }
}
