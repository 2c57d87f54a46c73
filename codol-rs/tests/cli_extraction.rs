//! CLI integration tests for the bulk-extract command
//!
//! These drive the actual `codol-rs` binary; they do not assert on archive
//! contents (that belongs to `codol-ifs`'s own test suite), only on the
//! CLI's argument handling and exit behaviour.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("codol-rs").expect("binary should be built by the test harness")
}

#[test]
fn missing_archive_fails_with_error() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let missing = temp.path().join("does-not-exist.ifs");

    cmd()
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to mount"));
}

#[test]
fn empty_directory_extracts_nothing() {
    let temp = TempDir::new().expect("failed to create temp dir");

    cmd().arg(temp.path()).assert().success();
}

#[test]
fn accepts_png_format_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");

    cmd().arg(temp.path()).arg("png").assert().success();
}

#[test]
fn rejects_unknown_format() {
    let temp = TempDir::new().expect("failed to create temp dir");

    cmd().arg(temp.path()).arg("bogus").assert().failure();
}
