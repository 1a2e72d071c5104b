//! # medicat Command Modules
//!
//! File: server/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the `medicat` binary. Each defines its own
//! argument struct and an async `handle_*` function called from `main.rs`.
//!
//! - `serve`: run the chat HTTP API
//! - `ask`: send a single utterance and print the reply
//!

/// One-shot utterance from the command line.
pub mod ask;
/// The chat HTTP server: configuration, handlers and server loop.
pub mod serve;
