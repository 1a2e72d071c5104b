//! # medicat Server Configuration
//!
//! File: server/src/commands/serve/config.rs
//!
//! ## Overview
//!
//! Turns `medicat serve` flags plus the loaded configuration files into the
//! final `ServeConfig`:
//! 1. Command-line flags (highest priority)
//! 2. `[server]` / `[provider]` tables from the config files
//! 3. Default values (lowest priority)
//!
//! Flags are `Option`s so "not given" is distinguishable from "given with
//! the default value".
//!
use crate::chat::llm::ProviderConfig;
use crate::core::config::{
    self, Config, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPLATES_DIR,
};
use crate::core::error::Result;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Port used when neither a flag nor a config file sets one.
pub const DEFAULT_PORT: u16 = 8000;

/// # Serve Command Arguments (`ServeArgs`)
///
/// Command-line arguments accepted by `medicat serve`.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Network address to bind to. Defaults to `127.0.0.1`.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on. Defaults to `8000`.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Directory containing `index.html`. Defaults to `./templates`.
    #[arg(long, short)]
    pub templates: Option<PathBuf>,

    /// Chat-completion model identifier.
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API (without `/chat/completions`).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Disables the permissive CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// # Effective Server Configuration (`ServeConfig`)
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: IpAddr,
    pub port: u16,
    pub templates_dir: PathBuf,
    pub enable_cors: bool,
    pub provider: ProviderConfig,
}

/// Merges flags over file settings over defaults.
pub fn resolve_config(args: ServeArgs, file: Config, api_key: String) -> Result<ServeConfig> {
    let provider = resolve_provider(args.model, args.base_url, &file, api_key)?;
    Ok(ServeConfig {
        host: args
            .host
            .or(file.server.host)
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        port: args.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
        templates_dir: args
            .templates
            .or_else(|| file.server.templates_dir.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR)),
        enable_cors: !args.no_cors && file.server.enable_cors.unwrap_or(true),
        provider,
    })
}

/// Resolves model and base URL the same way for every command that talks to
/// the provider.
pub fn resolve_provider(
    model: Option<String>,
    base_url: Option<String>,
    file: &Config,
    api_key: String,
) -> Result<ProviderConfig> {
    let base_url = base_url
        .or_else(|| file.provider.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    config::validate_base_url(&base_url)?;
    Ok(ProviderConfig {
        api_key,
        model: model
            .or_else(|| file.provider.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        base_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ProviderSection, ServerSection};

    #[test]
    fn test_defaults_without_flags_or_file() {
        let config = resolve_config(ServeArgs::default(), Config::default(), "k".into()).unwrap();

        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert!(config.enable_cors);
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.api_key, "k");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = Config {
            server: ServerSection {
                host: Some("0.0.0.0".parse().unwrap()),
                port: Some(9090),
                templates_dir: Some("/srv/pages".into()),
                enable_cors: Some(false),
            },
            provider: ProviderSection {
                model: Some("gpt-4o-mini".into()),
                base_url: Some("http://localhost:8080/v1".into()),
            },
        };

        let config = resolve_config(ServeArgs::default(), file, "k".into()).unwrap();

        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.templates_dir, PathBuf::from("/srv/pages"));
        assert!(!config.enable_cors);
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.provider.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_flags_override_file() {
        let file = Config {
            server: ServerSection {
                port: Some(9090),
                enable_cors: Some(true),
                ..Default::default()
            },
            provider: ProviderSection {
                model: Some("file-model".into()),
                ..Default::default()
            },
        };
        let args = ServeArgs {
            port: Some(7000),
            model: Some("flag-model".into()),
            templates: Some(PathBuf::from("web")),
            no_cors: true,
            ..Default::default()
        };

        let config = resolve_config(args, file, "k".into()).unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(config.provider.model, "flag-model");
        assert_eq!(config.templates_dir, PathBuf::from("web"));
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_invalid_base_url_flag_is_rejected() {
        let args = ServeArgs {
            base_url: Some("localhost:8080".into()),
            ..Default::default()
        };
        assert!(resolve_config(args, Config::default(), "k".into()).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = ServeArgs::parse_from([
            "serve", "--port", "8123", "--host", "0.0.0.0", "--no-cors", "-t", "pages",
        ]);
        assert_eq!(args.port, Some(8123));
        assert_eq!(args.host, Some("0.0.0.0".parse().unwrap()));
        assert!(args.no_cors);
        assert_eq!(args.templates, Some(PathBuf::from("pages")));
        assert_eq!(args.model, None);
    }
}
