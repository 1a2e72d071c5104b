//! # medicat Ask Integration Tests
//!
//! File: server/tests/ask.rs
//!
//! `medicat ask` shares the utterance path with `POST /chatbot/`, so these
//! tests exercise blank-input handling and the provider fallback end to end
//! without a network.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_ask_blank_utterance() {
    let dir = tempdir().unwrap();
    medicat_cmd_with_key(dir.path())
        // Port 1 is never contacted: blank input short-circuits.
        .args(["ask", "--base-url", "http://127.0.0.1:1", "   "])
        .assert()
        .success()
        .stdout("No input received\n");
}

#[test]
fn test_ask_unreachable_provider_prints_fallback() {
    let dir = tempdir().unwrap();
    medicat_cmd_with_key(dir.path())
        .args(["ask", "--base-url", "http://127.0.0.1:1", "머리가 아파요"])
        .assert()
        .success()
        .stdout(format!("{}\n", FALLBACK_MESSAGE));
}

#[test]
fn test_ask_uses_base_url_from_project_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".medicat.toml"),
        "[provider]\nbase_url = \"http://127.0.0.1:1\"\nmodel = \"test-model\"\n",
    )
    .unwrap();

    medicat_cmd_with_key(dir.path())
        .args(["ask", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FALLBACK_MESSAGE));
}

#[test]
fn test_ask_requires_api_key() {
    let dir = tempdir().unwrap();
    medicat_cmd(dir.path())
        .args(["ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}
