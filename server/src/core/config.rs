//! # medicat Configuration System
//!
//! File: server/src/core/config.rs
//!
//! ## Overview
//!
//! Loads, merges and validates the optional configuration files, and reads
//! the completion provider credential from the environment.
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied later by each command)
//! 2. Project-specific `.medicat.toml` in the current directory or ancestors
//! 3. User-specific `<config dir>/medicat/config.toml`
//! 4. Default values defined in the code
//!
//! The API key is never read from a file. It comes from `OPENAI_API_KEY`,
//! which `main` may have populated from a `.env` file.
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! templates_dir = "~/medicat/templates"
//!
//! [provider]
//! model = "gpt-3.5-turbo-1106"
//! ```
//!
use crate::core::error::{MedicatError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Environment variable holding the completion provider credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Model used when neither a flag nor a config file names one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-1106";
/// Base URL of the chat-completion API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Directory holding `index.html`, relative to the working directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

const PROJECT_CONFIG_FILENAME: &str = ".medicat.toml";

/// Settings read from a TOML configuration file. Every field is optional so
/// a file only needs to mention what it overrides.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub provider: ProviderSection,
}

/// `[server]` table: where and how the HTTP service listens.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    /// Directory containing `index.html` (can use ~). Will be expanded.
    pub templates_dir: Option<String>,
    pub enable_cors: Option<bool>,
}

/// `[provider]` table: which completion endpoint and model to call.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Loads the user and project configuration files and merges them, project
/// values winning. Missing files are not an error.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

/// Reads the provider credential from the environment.
///
/// An unset or blank variable is a startup failure.
pub fn read_api_key() -> Result<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(anyhow!(MedicatError::MissingApiKey {
            var: API_KEY_ENV.to_string(),
        })),
    }
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "medicat", "medicat") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.medicat.toml`. The search stops at
/// the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        server: ServerSection {
            host: project.server.host.or(user.server.host),
            port: project.server.port.or(user.server.port),
            templates_dir: project.server.templates_dir.or(user.server.templates_dir),
            enable_cors: project.server.enable_cors.or(user.server.enable_cors),
        },
        provider: ProviderSection {
            model: project.provider.model.or(user.provider.model),
            base_url: project.provider.base_url.or(user.provider.base_url),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = config.server.templates_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded templates directory: {}", dir);
    }
}

/// Checks values that TOML typing alone cannot rule out.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(model) = &config.provider.model {
        if model.trim().is_empty() {
            return Err(anyhow!(MedicatError::Config(
                "provider.model must not be empty".to_string()
            )));
        }
    }
    if let Some(base_url) = &config.provider.base_url {
        validate_base_url(base_url)?;
    }
    if let Some(dir) = &config.server.templates_dir {
        if dir.trim().is_empty() {
            return Err(anyhow!(MedicatError::Config(
                "server.templates_dir must not be empty".to_string()
            )));
        }
    }
    Ok(())
}

/// The provider base URL must be an absolute http(s) URL.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!(MedicatError::Config(format!(
            "Invalid provider base URL '{}'. Expected an http:// or https:// URL.",
            base_url
        ))))
    }
}
