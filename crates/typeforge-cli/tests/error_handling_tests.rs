//! Tests for error handling, suggestions and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn typeforge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("typeforge").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn lowercase_type_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    typeforge(dir.path())
        .args(["types", "-i", "user.json", "-n", "user"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid type name 'user'"))
        .stderr(predicate::str::contains("uppercase"));
}

#[test]
fn function_name_must_be_an_identifier() {
    let dir = TempDir::new().unwrap();
    typeforge(dir.path())
        .args([
            "mock", "-i", "a.json", "-t", "a.d.ts", "-n", "User", "-f", "get-user",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid function name 'get-user'"));
}

#[test]
fn missing_input_is_not_found() {
    let dir = TempDir::new().unwrap();
    typeforge(dir.path())
        .args(["types", "-i", "missing.json", "-n", "User"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn invalid_json_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{\"id\": 1,").unwrap();
    typeforge(dir.path())
        .args(["types", "-i", "bad.json", "-n", "User"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON in bad.json"));
}

#[test]
fn scalar_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("n.json"), "42").unwrap();
    typeforge(dir.path())
        .args(["types", "-i", "n.json", "-n", "Count"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be an object, found number"));
}

#[test]
fn undeclared_mock_type_is_not_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("user.json"), "{\"id\": 1}").unwrap();
    fs::write(dir.path().join("types.d.ts"), "export interface Other {}\n").unwrap();
    typeforge(dir.path())
        .args([
            "mock", "-i", "user.json", "-t", "types.d.ts", "-n", "User", "-f", "getUser",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Type 'User' is not declared"));
}

#[test]
fn malformed_markers_fail_the_switch() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ok.ts"), "// LIVE_START\n// real();\n// LIVE_END\n").unwrap();
    fs::write(dir.path().join("broken.ts"), "// DUMMY_START\nmock();\n").unwrap();

    typeforge(dir.path())
        .args(["switch", "live", "ok.ts", "broken.ts"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("malformed markers at line 1"))
        .stderr(predicate::str::contains("1 of 2 files could not be switched"));

    // The healthy file is still switched.
    assert_eq!(
        fs::read_to_string(dir.path().join("ok.ts")).unwrap(),
        "// LIVE_START\nreal();\n// LIVE_END\n"
    );
}

#[test]
fn switch_without_files_is_not_found() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    typeforge(dir.path())
        .args(["switch", "mock", "-d", "src"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No files to switch"));
}

#[test]
fn invalid_manifest_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("svc.json"), "{\"class_name\": \"UserService\"").unwrap();
    typeforge(dir.path())
        .args(["service", "-m", "svc.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid service manifest"));
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    typeforge(dir.path())
        .args(["--config", "nope.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to"));
}

#[test]
fn unknown_config_key() {
    let dir = TempDir::new().unwrap();
    typeforge(dir.path())
        .args(["config", "get", "mock.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn argument_errors_exit_with_two() {
    let dir = TempDir::new().unwrap();
    typeforge(dir.path())
        .args(["switch", "sideways", "a.ts"])
        .assert()
        .code(2);
}
