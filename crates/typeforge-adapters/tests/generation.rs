//! Use cases wired to the real adapters.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use typeforge_adapters::{LocalFilesystem, MemoryFilesystem, TypeScriptEmitter};
use typeforge_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{SwitchMode, markers},
    error::TypeforgeError,
    prelude::*,
};

const USER_JSON: &str = r#"{
  "id": 1,
  "name": "Ada",
  "company": {"name": "Acme", "address": {"city": "Paris"}},
  "friends": [{"name": "Bob", "address": {"city": "Rome"}}]
}"#;

fn generate(fs: impl Filesystem + 'static) -> GenerateService {
    GenerateService::new(Box::new(fs), Box::new(TypeScriptEmitter::default()))
}

#[test]
fn types_then_mock_in_a_project_tree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("user.json"), USER_JSON).unwrap();

    let service = generate(LocalFilesystem::new());
    let types = service
        .types(&TypesRequest {
            input: root.join("user.json"),
            type_name: "User".into(),
            output: Some(root.join("src/types/user.d.ts")),
        })
        .unwrap();
    assert_eq!(types.declaration_count, 3);

    let written = fs::read_to_string(root.join("src/types/user.d.ts")).unwrap();
    assert_eq!(written, types.content);
    assert!(written.contains("export interface UserCompanyAddress {\n  city: string;\n}"));
    assert!(written.contains("  friends: UserCompany[];"));

    let mock = service
        .mock(&MockRequest {
            input: root.join("user.json"),
            types_file: root.join("src/types/user.d.ts"),
            type_name: "User".into(),
            function_name: "getDummyUser".into(),
            output: Some(root.join("src/dummy/user.dummy.ts")),
            asynchronous: true,
            wrapped: true,
            default_types_import: "@/types/api/generated".into(),
            response_import: "@/types/api/api-general".into(),
        })
        .unwrap();
    assert!(mock.content.contains("import { User } from '../types/user';"));
    assert!(mock.content.contains("  name: 'Ada',"));
    assert!(root.join("src/dummy/user.dummy.ts").exists());
}

#[test]
fn mock_rejects_undeclared_type() {
    let fs = MemoryFilesystem::new()
        .with_file("user.json", USER_JSON)
        .and_then(|fs| fs.with_file("types.d.ts", "export interface Other {}\n"))
        .unwrap();

    let err = generate(fs)
        .mock(&MockRequest {
            input: PathBuf::from("user.json"),
            types_file: PathBuf::from("types.d.ts"),
            type_name: "User".into(),
            function_name: "getUser".into(),
            output: None,
            asynchronous: false,
            wrapped: false,
            default_types_import: "@/types".into(),
            response_import: "@/resp".into(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        TypeforgeError::Application(ApplicationError::TypeNotDeclared { .. })
    ));
}

#[test]
fn mock_accepts_hand_written_union_members() {
    let types = "\
export interface User {
  id: number;
  role: 'admin' | 'user';
}
";
    let fs = MemoryFilesystem::new()
        .with_file("user.json", r#"{"id": 7, "role": "admin"}"#)
        .and_then(|fs| fs.with_file("types.d.ts", types))
        .unwrap();

    let mock = generate(fs)
        .mock(&MockRequest {
            input: PathBuf::from("user.json"),
            types_file: PathBuf::from("types.d.ts"),
            type_name: "User".into(),
            function_name: "getUser".into(),
            output: None,
            asynchronous: false,
            wrapped: false,
            default_types_import: "@/types".into(),
            response_import: "@/resp".into(),
        })
        .unwrap();
    assert!(mock.content.contains("  role: 'admin',"));
}

#[test]
fn generated_service_toggles_on_disk() {
    let manifest = r#"
class_name = "UserService"
base_path = "/api/users"

[[methods]]
name = "getUser"
http_method = "GET"
endpoint = "/{id}"
response_type = "User"
response_type_path = "@/types/api/user"
mock_function = "getDummyUser"
mock_function_path = "@/dummy/user"
"#;
    let fs = MemoryFilesystem::new()
        .with_file("user.service.toml", manifest)
        .and_then(|fs| fs.with_file("src/.keep", ""))
        .unwrap();
    let service = generate(fs.clone());

    let spec = service
        .load_manifest(&PathBuf::from("user.service.toml"))
        .unwrap();
    let output = PathBuf::from("src/user.service.ts");
    let generated = service
        .service(&ServiceRequest {
            spec: spec.clone(),
            output: Some(output.clone()),
            force: false,
        })
        .unwrap();

    let again = service.service(&ServiceRequest {
        spec,
        output: Some(output.clone()),
        force: false,
    });
    assert!(matches!(
        again,
        Err(TypeforgeError::Application(ApplicationError::OutputExists { .. }))
    ));

    let switcher = SwitchService::new(Box::new(fs.clone()));
    let report = switcher.switch(SwitchMode::Live, &[output.clone()]);
    assert!(report.is_success());
    let live = fs.read_file(&output).unwrap();
    assert_eq!(live, markers::activate_live(&generated.content).unwrap());

    switcher.switch(SwitchMode::Mock, &[output.clone()]);
    assert_eq!(fs.read_file(&output).unwrap(), generated.content);

    let regions = switcher.inspect(&output).unwrap();
    assert_eq!(regions.len(), 3);

    let found = switcher
        .discover(&PathBuf::from("src"), "ts", Some("service"), &[])
        .unwrap();
    assert_eq!(found, vec![output]);
}
