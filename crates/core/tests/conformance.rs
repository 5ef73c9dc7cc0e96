//! Parser conformance suite.
//!
//! Positive fixtures are pairs:
//! - `<name>.thrift`        -- IDL source
//! - `<name>.expected.json` -- the expected document
//!
//! Negative fixtures pair `<name>.thrift` with `<name>.expected-error.json`,
//! which lists a subset of the fields of `ParseError::to_json_value()`.

use std::path::{Path, PathBuf};

fn run_fixture(fixture_dir: &Path, name: &str) {
    let source_path = fixture_dir.join(format!("{}.thrift", name));
    let expected_path = fixture_dir.join(format!("{}.expected.json", name));

    let source = std::fs::read(&source_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", source_path.display(), e));
    let actual = thrift_idl::parse_to_value(&source)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e));

    let expected_str = std::fs::read_to_string(&expected_path)
        .unwrap_or_else(|e| panic!("Failed to read expected document for {}: {}", name, e));
    let expected: serde_json::Value = serde_json::from_str(&expected_str)
        .unwrap_or_else(|e| panic!("Invalid expected JSON for {}: {}", name, e));

    assert_eq!(
        actual,
        expected,
        "Document mismatch for {}\n\nActual:\n{}\n\nExpected:\n{}",
        name,
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

fn run_error_fixture(fixture_dir: &Path, name: &str) {
    let source_path = fixture_dir.join(format!("{}.thrift", name));
    let expected_path = fixture_dir.join(format!("{}.expected-error.json", name));

    let source = std::fs::read(&source_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", source_path.display(), e));
    let error = match thrift_idl::parse(&source) {
        Ok(document) => panic!("Expected parse error for {}, got {:?}", name, document),
        Err(e) => e.to_json_value(),
    };
    assert_eq!(error["kind"], "THRIFT_FILE_PARSING_ERROR");

    let expected_str = std::fs::read_to_string(&expected_path)
        .unwrap_or_else(|e| panic!("Failed to read expected error for {}: {}", name, e));
    let expected: serde_json::Value = serde_json::from_str(&expected_str)
        .unwrap_or_else(|e| panic!("Invalid expected JSON for {}: {}", name, e));

    for (key, value) in expected.as_object().unwrap() {
        assert_eq!(
            &error[key], value,
            "Error field '{}' mismatch for {}\n\nActual:\n{}",
            key,
            name,
            serde_json::to_string_pretty(&error).unwrap(),
        );
    }
}

fn conformance_dir(kind: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("conformance")
        .join(kind)
}

// ──────────────────────────────────────────────
// Positive fixtures
// ──────────────────────────────────────────────

#[test]
fn tutorial() {
    run_fixture(&conformance_dir("positive"), "tutorial");
}

#[test]
fn containers() {
    run_fixture(&conformance_dir("positive"), "containers");
}

#[test]
fn separators_and_comments() {
    run_fixture(&conformance_dir("positive"), "separators_and_comments");
}

#[test]
fn redeclaration() {
    run_fixture(&conformance_dir("positive"), "redeclaration");
}

#[test]
fn empty() {
    run_fixture(&conformance_dir("positive"), "empty");
}

// ──────────────────────────────────────────────
// Negative fixtures
// ──────────────────────────────────────────────

#[test]
fn field_without_name() {
    run_error_fixture(&conformance_dir("negative"), "field_without_name");
}

#[test]
fn trailing_garbage() {
    run_error_fixture(&conformance_dir("negative"), "trailing_garbage");
}

#[test]
fn arithmetic_const() {
    run_error_fixture(&conformance_dir("negative"), "arithmetic_const");
}

#[test]
fn mismatched_literal() {
    run_error_fixture(&conformance_dir("negative"), "mismatched_literal");
}

#[test]
fn unclosed_container() {
    run_error_fixture(&conformance_dir("negative"), "unclosed_container");
}

#[test]
fn throws_without_list() {
    run_error_fixture(&conformance_dir("negative"), "throws_without_list");
}
