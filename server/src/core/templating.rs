//! # medicat Page Templates
//!
//! File: server/src/core/templating.rs
//!
//! ## Overview
//!
//! Renders the chat page served at `GET /`. Templates are loaded from a
//! directory with the Tera engine; `index.html` must be among them.
//!
//! The page is static, so the server renders it once at startup and keeps
//! the resulting HTML. A missing or broken template therefore fails the
//! process before it binds a port, never an individual request.
//!
//! ## Examples
//!
//! ```rust
//! let pages = PageRenderer::load(Path::new("templates"))?;
//! let html = pages.render_index(&PageContext::default())?;
//! ```
//!
use crate::core::error::{MedicatError, Result};
use anyhow::{anyhow, Context};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info};

/// Name of the template rendered for `GET /`.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Values exposed to the page template.
#[derive(Serialize, Debug, Clone)]
pub struct PageContext {
    pub title: String,
    pub chat_endpoint: String,
    pub response_endpoint: String,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            title: "Medicat".to_string(),
            chat_endpoint: "/chatbot/".to_string(),
            response_endpoint: "/response/".to_string(),
        }
    }
}

/// A loaded Tera template set.
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
    dir: PathBuf,
}

impl PageRenderer {
    /// Loads every `*.html` file below `dir` and checks that `index.html`
    /// is present.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(anyhow!(MedicatError::TemplateNotFound {
                name: INDEX_TEMPLATE.to_string(),
                dir: dir.display().to_string(),
            }))
            .context("Templates directory does not exist");
        }

        let pattern = format!("{}/**/*.html", dir.display());
        debug!("Loading templates matching '{}'", pattern);
        let tera = Tera::new(&pattern)
            .map_err(|e| anyhow!(MedicatError::Template { source: e }))
            .with_context(|| format!("Failed to load templates from '{}'", dir.display()))?;

        if !tera.get_template_names().any(|name| name == INDEX_TEMPLATE) {
            return Err(anyhow!(MedicatError::TemplateNotFound {
                name: INDEX_TEMPLATE.to_string(),
                dir: dir.display().to_string(),
            }));
        }

        info!("Loaded page templates from {}", dir.display());
        Ok(Self {
            tera,
            dir: dir.to_path_buf(),
        })
    }

    /// Renders `index.html` with the given context.
    pub fn render_index(&self, context: &PageContext) -> Result<String> {
        let tera_context = tera::Context::from_serialize(context)
            .map_err(|e| anyhow!(MedicatError::Template { source: e }))?;
        self.tera
            .render(INDEX_TEMPLATE, &tera_context)
            .map_err(|e| anyhow!(MedicatError::Template { source: e }))
            .with_context(|| {
                format!(
                    "Tera rendering failed for '{}'",
                    self.dir.join(INDEX_TEMPLATE).display()
                )
            })
    }
}
