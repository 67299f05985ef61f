//! Browser UI page rendering.
//!
//! Turns storage listings into the view models consumed by the templates in
//! `templates/pages/` and renders them.

pub mod engine;

pub use engine::{render_page, PageError};

use minijinja::context;
use serde::Serialize;

use crate::modules::storage::StoredFile;
use crate::shared::constants::DELETE_CONFIRMATION_TOKEN;

/// One row of the file table on the index page
#[derive(Debug, Serialize)]
pub struct FileRowView {
    /// Name as shown to the user
    pub name: String,
    /// Name percent-encoded for use as a single URL path segment
    pub href: String,
    pub size: String,
    pub modified: String,
}

impl From<&StoredFile> for FileRowView {
    fn from(file: &StoredFile) -> Self {
        Self {
            name: file.name.clone(),
            href: urlencoding::encode(&file.name).into_owned(),
            size: file.size.map(format_size).unwrap_or_else(|| "-".to_string()),
            modified: file
                .modified
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Human readable byte count (1024-based)
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Render the file listing page with the upload form.
pub fn render_index_page(files: &[StoredFile]) -> Result<String, PageError> {
    let rows: Vec<FileRowView> = files.iter().map(FileRowView::from).collect();
    render_page("index.html", context! { files => rows })
}

/// Render the rename form pre-filled with the current name.
pub fn render_rename_page(name: &str) -> Result<String, PageError> {
    render_page("rename.html", context! { name => name })
}

/// Render the delete form asking for the confirmation token.
pub fn render_delete_page(name: &str) -> Result<String, PageError> {
    render_page(
        "delete.html",
        context! { name => name, token => DELETE_CONFIRMATION_TOKEN },
    )
}
