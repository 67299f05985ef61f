//! Template engine for the browser UI pages.
//!
//! Pages are Jinja2 templates compiled into the binary from `templates/pages/`.
//! Files ending in `.html` are rendered with HTML auto-escaping, so file names
//! coming from disk never reach the document unescaped.

use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static PAGE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Page templates embedded at compile time, keyed by template name
const PAGE_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/pages/base.html")),
    ("index.html", include_str!("../../../templates/pages/index.html")),
    ("rename.html", include_str!("../../../templates/pages/rename.html")),
    ("delete.html", include_str!("../../../templates/pages/delete.html")),
];

/// Errors that can occur during page rendering
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Page template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render page: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in PAGE_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load page template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded page template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    PAGE_ENV.get_or_init(init_environment)
}

/// Render a page template with any serializable context.
pub fn render_page<S: Serialize>(page_name: &str, ctx: S) -> Result<String, PageError> {
    let template = get_environment()
        .get_template(page_name)
        .map_err(|_| PageError::NotFound(page_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| PageError::RenderError(e.to_string()))
}

/// Check if a page template exists
#[cfg(test)]
pub fn page_exists(page_name: &str) -> bool {
    get_environment().get_template(page_name).is_ok()
}
