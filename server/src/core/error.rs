//! # medicat Error Types
//!
//! File: server/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used for startup and configuration
//! failures. Anything reported through `MedicatError` is fatal: it stops the
//! process before the server accepts traffic.
//!
//! Failures of the completion provider are *not* modelled here. They are
//! recovered at request time and live in `chat::llm::ProviderError`.
//!
//! ## Architecture
//!
//! - `MedicatError`: a `thiserror` enum for specific failure kinds
//! - `Result<T>`: an alias for `anyhow::Result<T>` so call sites can attach
//!   context with `.context(...)`
//!
//! ## Examples
//!
//! ```rust
//! let key = std::env::var(API_KEY_ENV)
//!     .map_err(|_| MedicatError::MissingApiKey { var: API_KEY_ENV.to_string() })?;
//! ```
//!
use thiserror::Error;

/// Custom error type for medicat startup and configuration failures.
#[derive(Error, Debug)]
pub enum MedicatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing API key: set the {var} environment variable (or add it to .env).")]
    MissingApiKey { var: String },

    #[error("Template '{name}' not found in '{dir}'.")]
    TemplateNotFound { name: String, dir: String },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = MedicatError::Config("port must not be 0".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: port must not be 0"
        );

        let missing_key = MedicatError::MissingApiKey {
            var: "OPENAI_API_KEY".into(),
        };
        assert!(missing_key.to_string().contains("OPENAI_API_KEY"));

        let not_found = MedicatError::TemplateNotFound {
            name: "index.html".into(),
            dir: "templates".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "Template 'index.html' not found in 'templates'."
        );
    }
}
