//! CLI integration tests.
//!
//! Uses `assert_cmd` to spawn the `sjavac` binary and verify exit codes,
//! stdout content and stderr content. Tests run from the workspace root so
//! that `conformance/` and `docs/` resolve.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn sjavac() -> Command {
    let mut cmd = cargo_bin_cmd!("sjavac");
    cmd.current_dir(workspace_root());
    cmd
}

/// Write `src` to a temp file and return the dir guard and the file path.
fn source_file(src: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.sjava");
    fs::write(&path, src).unwrap();
    (dir, path)
}

// ──────────────────────────────────────────────
// Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    sjavac()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("s-Java static verifier"));
}

#[test]
fn version_exits_0() {
    sjavac()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sjavac"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    sjavac().assert().failure().code(2);
}

// ──────────────────────────────────────────────
// check
// ──────────────────────────────────────────────

#[test]
fn check_valid_file_prints_0() {
    sjavac()
        .args(["check", "conformance/positive/methods.sjava"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr("");
}

#[test]
fn check_invalid_file_prints_1_and_diagnostic() {
    sjavac()
        .args(["check", "conformance/negative/semantics/final_reassignment.sjava"])
        .assert()
        .code(1)
        .stdout("1\n")
        .stderr(predicate::str::starts_with("semantics error: line 2:"));
}

#[test]
fn check_missing_file_prints_2() {
    sjavac()
        .args(["check", "conformance/does_not_exist.sjava"])
        .assert()
        .code(2)
        .stdout("2\n")
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn check_quiet_suppresses_text_diagnostic() {
    let (_dir, path) = source_file("int a = 1\n");
    sjavac()
        .args(["--quiet", "check"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout("1\n")
        .stderr("");
}

#[test]
fn check_counts_only_non_blank_lines() {
    let (_dir, path) = source_file("\nint a;\n\n   \nint a;\n");
    sjavac()
        .arg("check")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("build error: line 2:"));
}

#[test]
fn check_empty_file_is_legal() {
    let (_dir, path) = source_file("");
    sjavac().arg("check").arg(&path).assert().success().stdout("0\n");
}

// ──────────────────────────────────────────────
// check --output json
// ──────────────────────────────────────────────

fn diagnostic_validator() -> jsonschema::Validator {
    let schema_path = workspace_root().join("docs/diagnostic-schema.json");
    let schema: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(schema_path).unwrap()).unwrap();
    jsonschema::validator_for(&schema).unwrap()
}

fn json_diagnostic(path: &Path) -> serde_json::Value {
    let output = sjavac()
        .args(["--output", "json", "check"])
        .arg(path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    serde_json::from_slice(&output.stderr).unwrap()
}

#[test]
fn json_diagnostic_matches_schema() {
    let validator = diagnostic_validator();
    for src in [
        "+ a;\n",
        "int a = 1\n",
        "int a;\nint a;\n",
        "void f() {\n}\n",
        "void f() {\nreturn;\n",
        "int a;\n}\n",
    ] {
        let (_dir, path) = source_file(src);
        let diag = json_diagnostic(&path);
        if let Err(e) = validator.validate(&diag) {
            panic!("{:?}: {}\n{}", src, e, diag);
        }
    }
}

#[test]
fn json_diagnostic_fields() {
    let (_dir, path) = source_file("void f() {\nint x;\nif (x) {\n}\nreturn;\n}\n");
    let diag = json_diagnostic(&path);
    assert_eq!(diag["kind"], "uninitialized_use");
    assert_eq!(diag["line"], 3);
    assert_eq!(diag["phase"], "semantics");
    assert_eq!(diag["file"], path.display().to_string());
}

#[test]
fn json_diagnostic_ignores_quiet() {
    let (_dir, path) = source_file("int a = 1\n");
    sjavac()
        .args(["--output", "json", "--quiet", "check"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"kind\": \"syntax\""));
}

// ──────────────────────────────────────────────
// tokens
// ──────────────────────────────────────────────

#[test]
fn tokens_text_dump() {
    let (_dir, path) = source_file("void foo(int a) {\n\nreturn;\n}\n");
    sjavac()
        .arg("tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("method_declaration"))
        .stdout(predicate::str::contains("method_name(foo)"))
        .stdout(predicate::str::contains("global.foo"))
        .stdout(predicate::str::contains("   3  closing_bracket"));
}

#[test]
fn tokens_json_dump() {
    let (_dir, path) = source_file("int x = 5;\n");
    let output = sjavac()
        .args(["--output", "json", "tokens"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(lines[0]["number"], 1);
    assert_eq!(lines[0]["kind"], "var_declaration");
    assert_eq!(lines[0]["scope"], "global");
    assert_eq!(lines[0]["tokens"][1]["kind"], "var_name");
    assert_eq!(lines[0]["tokens"][1]["name"], "x");
}

#[test]
fn tokens_stops_at_syntax_error() {
    let (_dir, path) = source_file("int x = ;\n");
    sjavac()
        .arg("tokens")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("syntax error: line 1:"));
}

#[test]
fn tokens_reads_lazily_like_check() {
    // Line 1 fails before the undecodable line 2 is read, so both commands
    // report the syntax error rather than an I/O failure.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.sjava");
    fs::write(&path, b"int a = 1\n\xff\xfe\n").unwrap();
    for cmd in ["tokens", "check"] {
        sjavac()
            .arg(cmd)
            .arg(&path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("syntax error: line 1:"));
    }
}

#[test]
fn tokens_undecodable_input_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.sjava");
    fs::write(&path, b"int a = 1;\n\xff\xfe\n").unwrap();
    sjavac()
        .arg("tokens")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read"));
}

// ──────────────────────────────────────────────
// test
// ──────────────────────────────────────────────

#[test]
fn conformance_suite_passes() {
    sjavac()
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("TAP version 14"))
        .stdout(predicate::str::contains("ok 1 - positive/"))
        .stdout(predicate::str::contains("# fail  0"));
}

#[test]
fn conformance_failure_exits_1() {
    let dir = TempDir::new().unwrap();
    let group = dir.path().join("negative/syntax");
    fs::create_dir_all(&group).unwrap();
    fs::write(group.join("not_an_error.sjava"), "int a;\n").unwrap();
    fs::write(
        group.join("not_an_error.expected-error.json"),
        "{\"kind\": \"syntax\", \"line\": 1}",
    )
    .unwrap();

    sjavac()
        .arg("test")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not ok 1 - negative/syntax/not_an_error"));
}

#[test]
fn conformance_missing_dir_exits_1() {
    sjavac()
        .args(["test", "no/such/suite"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}
