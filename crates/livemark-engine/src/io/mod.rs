use std::fs;
use std::path::{Path, PathBuf};

use xi_rope::Rope;

pub const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a markdown file: {0}")]
    NotMarkdown(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// True if `path` has one of the markdown extensions (case-insensitive).
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(ext))
        })
}

/// Read a markdown file into a rope
pub fn read_document(path: &Path) -> Result<Rope, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    if !is_markdown(path) {
        return Err(IoError::NotMarkdown(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    log::debug!("read {} ({} bytes)", path.display(), text.len());
    Ok(Rope::from(text))
}
