//! # medicat Core Infrastructure
//!
//! File: server/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the commands:
//! - `config`: layered configuration files and the provider credential
//! - `error`: startup error types and the crate-wide `Result` alias
//! - `templating`: Tera-based rendering of the chat page
//!
pub mod config;
pub mod error;
pub mod templating;
