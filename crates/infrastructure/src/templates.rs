//! Dashboard template loading
//!
//! The template file is read once at startup and held for the process
//! lifetime; a missing or empty file is a startup error, not something to
//! discover on the first render.

use std::path::Path;

use application::render::Template;
use thiserror::Error;
use tracing::info;

/// Template loading errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file missing or unreadable
    #[error("Template not found: {path}: {source}")]
    NotFound {
        /// Configured template path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Template file exists but is empty
    #[error("Template is empty: {0}")]
    Empty(String),
}

/// Load the dashboard template from disk
pub fn load_template(path: &Path) -> Result<Template, TemplateError> {
    let text = std::fs::read_to_string(path).map_err(|source| TemplateError::NotFound {
        path: path.display().to_string(),
        source,
    })?;

    if text.trim().is_empty() {
        return Err(TemplateError::Empty(path.display().to_string()));
    }

    info!(path = %path.display(), bytes = text.len(), "dashboard template loaded");
    Ok(Template::new(text))
}
