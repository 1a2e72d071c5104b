//! # medicat Integration Test Common Helpers
//!
//! File: server/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `server/tests/`. Every
//! command built here runs in an isolated temporary directory with no API
//! key, no user config and no `RUST_LOG`, so the developer's environment
//! cannot leak into the assertions.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// Fallback text printed when the completion provider cannot be reached.
pub const FALLBACK_MESSAGE: &str = "Sorry, I am unable to process your request at the moment.";

/// # Get medicat Command (`medicat_cmd`)
///
/// A `Command` for the compiled `medicat` binary with a clean environment
/// rooted at `dir` (used as working directory, `HOME` and config home).
///
/// ## Panics
/// Panics if the `medicat` binary cannot be found via `Command::cargo_bin`.
pub fn medicat_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("medicat").expect("Failed to find medicat binary for testing");
    cmd.current_dir(dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

/// Same as [`medicat_cmd`] with a dummy API key set.
pub fn medicat_cmd_with_key(dir: &Path) -> Command {
    let mut cmd = medicat_cmd(dir);
    cmd.env("OPENAI_API_KEY", "test-key");
    cmd
}
