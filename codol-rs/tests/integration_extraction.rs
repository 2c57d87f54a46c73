//! Integration tests for the interactive rip shell
//!
//! Drives the `codol-rs` binary with no archive argument, piping commands
//! over stdin and checking the printed responses.

use assert_cmd::Command;
use predicates::prelude::*;

fn shell() -> Command {
    Command::cargo_bin("codol-rs").expect("binary should be built by the test harness")
}

#[test]
fn ripanims_reports_missing_process() {
    shell()
        .write_stdin("ripanims seanim\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("requires an attached game process"));
}

#[test]
fn ripimages_reports_missing_process() {
    shell()
        .write_stdin("ripimages png\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("requires an attached game process"));
}

#[test]
fn unknown_command_is_reported_and_shell_still_exits() {
    shell()
        .write_stdin("dance\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command: dance"));
}

#[test]
fn closing_stdin_ends_the_shell() {
    shell().write_stdin("").assert().success();
}
