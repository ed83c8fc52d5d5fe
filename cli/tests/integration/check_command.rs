//! End-to-end tests for `freetier check` and `freetier domains`.
//!
//! Each test installs a stub `oci` script in a temp dir and points the binary
//! at it with `--oci-cli`. Tests are `#[serial]` so no other test forks while
//! a stub script is still open for writing.

#![cfg(unix)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;

use crate::stub::{AMPERE, MICRO, StubOci, TENANCY};

fn freetier(stub: &StubOci) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("freetier"));
    cmd.env("NO_COLOR", "1")
        .env("FREETIER_CONFIG", stub.dir().join("freetier.yaml"))
        .env_remove("FREETIER_COMPARTMENT_ID")
        .env_remove("FREETIER_OCI_CLI")
        .env_remove("OCI_CLI_PROFILE")
        .env_remove("OCI_CLI_CONFIG_FILE");
    cmd
}

/// `freetier check` wired to the stub, resolving the tenancy from a temp
/// OCI config file.
fn check(stub: &StubOci) -> Command {
    let oci = stub.install();
    let config = stub.write_oci_config("DEFAULT", Some(TENANCY));
    let mut cmd = freetier(stub);
    cmd.arg("check")
        .arg("--oci-cli")
        .arg(oci)
        .arg("--oci-config")
        .arg(config);
    cmd
}

// ── Exit codes and summary ────────────────────────────────────────────────────

#[test]
#[serial]
fn test_check_ampere_available_in_second_domain_exits_zero() {
    let stub = StubOci::new(&["AD-1", "AD-2"])
        .status("AD-1", AMPERE, "OUT_OF_HOST_CAPACITY")
        .status("AD-1", MICRO, "OUT_OF_HOST_CAPACITY")
        .status("AD-2", AMPERE, "AVAILABLE")
        .status("AD-2", MICRO, "OUT_OF_HOST_CAPACITY");

    check(&stub)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("OCI Free Tier Availability Checker"))
        .stdout(predicate::str::contains("Ampere A1 instances are AVAILABLE!"))
        .stdout(predicate::str::contains("Ampere A1: AVAILABLE ✓"))
        .stdout(predicate::str::contains("E2.1.Micro: NOT AVAILABLE ✗"));

    // One listing plus two probes per domain.
    let calls = stub.calls();
    assert_eq!(calls.len(), 5);
    assert!(calls[0].starts_with("iam availability-domain list"));
    assert!(calls[0].contains(TENANCY));
    assert!(calls[1].contains("--availability-domain AD-1"));
    assert!(calls[1].contains(AMPERE));
    assert!(calls[2].contains(MICRO));
    assert!(calls[3].contains("--availability-domain AD-2"));
}

#[test]
#[serial]
fn test_check_nothing_available_exits_one() {
    let stub = StubOci::new(&["AD-1"])
        .status("AD-1", AMPERE, "OUT_OF_HOST_CAPACITY")
        .status("AD-1", MICRO, "OUT_OF_HOST_CAPACITY");

    check(&stub)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Ampere A1: NOT AVAILABLE ✗"))
        .stdout(predicate::str::contains("E2.1.Micro: NOT AVAILABLE ✗"));
}

#[test]
#[serial]
fn test_check_failed_probe_is_counted_and_run_continues() {
    // No canned report for AD-1 Ampere: the stub exits 2 for that probe.
    let stub = StubOci::new(&["AD-1", "AD-2"])
        .status("AD-1", MICRO, "OUT_OF_HOST_CAPACITY")
        .status("AD-2", AMPERE, "OUT_OF_HOST_CAPACITY")
        .status("AD-2", MICRO, "AVAILABLE");

    check(&stub)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("E2.1.Micro: AVAILABLE ✓"))
        .stdout(predicate::str::contains("! Ampere A1 check failed"))
        .stdout(predicate::str::contains("ServiceError: no canned report for AD-1"))
        .stdout(predicate::str::contains("1 capacity probe failed"));

    assert_eq!(stub.calls().len(), 5);
}

#[test]
#[serial]
fn test_check_quiet_still_prints_summary() {
    let stub = StubOci::new(&["AD-1"])
        .status("AD-1", AMPERE, "AVAILABLE")
        .status("AD-1", MICRO, "OUT_OF_HOST_CAPACITY");

    check(&stub)
        .arg("--quiet")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Ampere A1: AVAILABLE ✓"))
        .stdout(predicate::str::contains("Checking availability domain").not());
}

#[test]
#[serial]
fn test_check_shape_filter_probes_only_micro() {
    let stub = StubOci::new(&["AD-1"]).status("AD-1", MICRO, "AVAILABLE");

    check(&stub)
        .args(["--shape", "micro"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("E2.1.Micro: AVAILABLE ✓"))
        .stdout(predicate::str::contains("Ampere A1:").not());

    let calls = stub.calls();
    assert_eq!(calls.len(), 2);
    assert!(!calls[1].contains(AMPERE));
}

// ── Setup failures ────────────────────────────────────────────────────────────

#[test]
#[serial]
fn test_check_missing_tenancy_exits_one_without_probing() {
    let stub = StubOci::new(&["AD-1"]);
    let oci = stub.install();
    let config = stub.write_oci_config("DEFAULT", None);

    freetier(&stub)
        .arg("check")
        .arg("--oci-cli")
        .arg(oci)
        .arg("--oci-config")
        .arg(config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Could not determine compartment/tenancy ID",
        ))
        .stderr(predicate::str::contains("oci setup config"));

    assert!(stub.calls().is_empty());
}

#[test]
#[serial]
fn test_check_missing_oci_config_file_exits_one() {
    let stub = StubOci::new(&["AD-1"]);
    let oci = stub.install();

    freetier(&stub)
        .arg("check")
        .arg("--oci-cli")
        .arg(oci)
        .arg("--oci-config")
        .arg(stub.dir().join("does-not-exist"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OCI config file not found"));
}

#[test]
#[serial]
fn test_check_empty_domain_list_exits_one_without_probing() {
    let stub = StubOci::new(&[]);

    check(&stub)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No availability domains returned"));

    assert_eq!(stub.calls().len(), 1);
}

#[test]
#[serial]
fn test_check_domain_listing_failure_shows_stderr() {
    let stub = StubOci::new(&["AD-1"]).fail_domains("ServiceError: NotAuthenticated");

    check(&stub)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not fetch availability domains"))
        .stderr(predicate::str::contains("NotAuthenticated"));
}

#[test]
#[serial]
fn test_check_missing_oci_binary_exits_one() {
    let stub = StubOci::new(&["AD-1"]);

    freetier(&stub)
        .arg("check")
        .arg("--oci-cli")
        .arg(stub.dir().join("no-such-oci"))
        .arg("--compartment-id")
        .arg(TENANCY)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not fetch availability domains"));
}

// ── Overrides ─────────────────────────────────────────────────────────────────

#[test]
#[serial]
fn test_check_compartment_id_flag_skips_oci_config() {
    let stub = StubOci::new(&["AD-1"])
        .status("AD-1", AMPERE, "AVAILABLE")
        .status("AD-1", MICRO, "AVAILABLE");
    let oci = stub.install();

    freetier(&stub)
        .arg("check")
        .arg("--oci-cli")
        .arg(oci)
        .arg("--oci-config")
        .arg(stub.dir().join("does-not-exist"))
        .env("FREETIER_COMPARTMENT_ID", TENANCY)
        .assert()
        .code(0);

    assert!(stub.calls()[0].contains(TENANCY));
}

#[test]
#[serial]
fn test_check_non_default_profile_is_read_and_forwarded() {
    let stub = StubOci::new(&["AD-1"])
        .status("AD-1", AMPERE, "AVAILABLE")
        .status("AD-1", MICRO, "AVAILABLE");
    let oci = stub.install();
    let config = stub.write_oci_config("WORK", Some(TENANCY));

    freetier(&stub)
        .args(["check", "--profile", "WORK"])
        .arg("--oci-cli")
        .arg(oci)
        .arg("--oci-config")
        .arg(config)
        .assert()
        .code(0);

    assert!(stub.calls()[0].contains("--profile WORK"));
}

// ── JSON output ───────────────────────────────────────────────────────────────

#[test]
#[serial]
fn test_check_json_report_on_stdout() {
    let stub = StubOci::new(&["AD-1", "AD-2"])
        .status("AD-1", AMPERE, "OUT_OF_HOST_CAPACITY")
        .status("AD-1", MICRO, "OUT_OF_HOST_CAPACITY")
        .status("AD-2", AMPERE, "AVAILABLE")
        .status("AD-2", MICRO, "OUT_OF_HOST_CAPACITY");

    let output = check(&stub).arg("--json").output().expect("run freetier");

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["compartment_id"], TENANCY);
    assert_eq!(report["any_available"], true);
    assert_eq!(report["failed_probes"], 0);
    assert_eq!(report["domains"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["domains"][1]["name"], "AD-2");
    assert_eq!(report["domains"][1]["probes"][0]["status"], "available");
    assert_eq!(report["domains"][0]["probes"][0]["status"], "unavailable");
    assert_eq!(
        report["domains"][0]["probes"][0]["detail"],
        "OUT_OF_HOST_CAPACITY"
    );
}

#[test]
#[serial]
fn test_check_json_setup_error_has_code() {
    let stub = StubOci::new(&["AD-1"]);
    let oci = stub.install();
    let config = stub.write_oci_config("DEFAULT", None);

    let output = freetier(&stub)
        .args(["--json", "check"])
        .arg("--oci-cli")
        .arg(oci)
        .arg("--oci-config")
        .arg(config)
        .output()
        .expect("run freetier");

    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(err["error"], true);
    assert_eq!(err["code"], "NO_COMPARTMENT");
}

// ── domains ───────────────────────────────────────────────────────────────────

#[test]
#[serial]
fn test_domains_lists_names() {
    let stub = StubOci::new(&["Uocm:PHX-AD-1", "Uocm:PHX-AD-2"]);
    let oci = stub.install();

    freetier(&stub)
        .arg("domains")
        .arg("--oci-cli")
        .arg(oci)
        .arg("--compartment-id")
        .arg(TENANCY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Uocm:PHX-AD-1"))
        .stdout(predicate::str::contains("Uocm:PHX-AD-2"));
}

#[test]
#[serial]
fn test_domains_json() {
    let stub = StubOci::new(&["AD-1"]);
    let oci = stub.install();

    let output = freetier(&stub)
        .args(["domains", "--json"])
        .arg("--oci-cli")
        .arg(oci)
        .arg("--compartment-id")
        .arg(TENANCY)
        .output()
        .expect("run freetier");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["compartment_id"], TENANCY);
    assert_eq!(value["domains"][0], "AD-1");
}
