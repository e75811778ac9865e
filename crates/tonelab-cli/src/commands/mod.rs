//! CLI command implementations

pub mod adjust;
pub mod correct;
pub mod histogram;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use tonelab_core::Editor;

use crate::config::AppConfig;

/// Create an editor with the configured encoder and load `path` into it.
pub fn open_editor(path: &Path, config: &AppConfig) -> Result<Editor> {
    let mut editor = Editor::with_encode_options(config.encode_options());
    editor
        .load_path(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    Ok(editor)
}

/// Write the editor's current raster. The container follows the extension.
pub fn save_editor(editor: &Editor, path: &Path) -> Result<()> {
    editor
        .save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}
