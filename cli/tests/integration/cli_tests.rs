//! Integration tests for argument parsing, help and version output.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn freetier() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("freetier"));
    cmd.env("NO_COLOR", "1")
        .env("FREETIER_CONFIG", "/nonexistent/freetier/config.yaml");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    freetier()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Watch OCI Always Free compute capacity"));
}

#[test]
fn test_cli_help_lists_commands() {
    freetier()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("domains"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_check_help_shows_shape_and_oci_options() {
    freetier()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--shape"))
        .stdout(predicate::str::contains("--compartment-id"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_version_command_shows_version() {
    freetier()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "freetier ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = freetier()
        .args(["version", "--json"])
        .output()
        .expect("run freetier");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

// --- Usage errors ---

#[test]
fn test_unknown_subcommand_exits_two() {
    freetier().arg("launch").assert().code(2);
}

#[test]
fn test_invalid_shape_value_exits_two() {
    freetier()
        .args(["check", "--shape", "gpu"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ampere"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    freetier()
        .args(["check", "--timeout", "0"])
        .assert()
        .code(2);
}
