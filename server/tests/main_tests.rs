//! # medicat Main Integration Tests
//!
//! File: server/tests/main_tests.rs
//!
//! Top-level behavior of the `medicat` binary: `--help`, `--version` and
//! argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_commands() {
    let dir = tempdir().unwrap();
    medicat_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn test_version_flag() {
    let dir = tempdir().unwrap();
    medicat_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    let dir = tempdir().unwrap();
    medicat_cmd(dir.path()).assert().failure();
}

#[test]
fn test_serve_help_shows_flags() {
    let dir = tempdir().unwrap();
    medicat_cmd(dir.path())
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--templates"))
        .stdout(predicate::str::contains("--no-cors"))
        .stdout(predicate::str::contains("--base-url"));
}
