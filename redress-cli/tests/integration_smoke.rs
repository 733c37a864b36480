//! Smoke tests to verify flag wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_bind_flag() {
    let mut cmd = Command::cargo_bin("redress").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_help_lists_database_url_flag() {
    let mut cmd = Command::cargo_bin("redress").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_help_lists_debug_flag() {
    let mut cmd = Command::cargo_bin("redress").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--debug"));
}

#[test]
fn test_version_prints_package_version() {
    let mut cmd = Command::cargo_bin("redress").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejects_malformed_bind_address() {
    let mut cmd = Command::cargo_bin("redress").unwrap();
    cmd.arg("--bind").arg("not-an-address");

    cmd.assert().failure();
}
