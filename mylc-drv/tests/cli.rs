//! End-to-end tests driving the built `mylc` binary against fixture
//! `.mylang` sources.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn compiling_a_valid_module_writes_the_header_and_source_pair() {
    let out_dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("mylc")
        .unwrap()
        .arg("tests/fixtures/vector.mylang")
        .arg("--output-dir")
        .arg(out_dir.path())
        .assert()
        .success();

    let header = std::fs::read_to_string(out_dir.path().join("vector.h")).unwrap();
    assert!(header.contains("struct vec2 {"));
    assert!(header.contains("vec2 add(const vec2& lhs, const vec2& rhs);"));

    let source = std::fs::read_to_string(out_dir.path().join("vector.cpp")).unwrap();
    assert!(source.contains("vec2 add(const vec2& lhs, const vec2& rhs) {"));
}

#[test]
fn a_syntax_error_exits_nonzero_and_reports_on_stderr() {
    let out_dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("mylc")
        .unwrap()
        .arg("tests/fixtures/broken.mylang")
        .arg("--output-dir")
        .arg(out_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error][Ln"));
}

#[test]
fn no_input_files_is_a_usage_error() {
    Command::cargo_bin("mylc").unwrap().assert().failure();
}
