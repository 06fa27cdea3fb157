// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

use crate::types::UploadFile;

/// Extensions offered by the document picker. A hint only: other files are
/// still uploaded.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".txt"];

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn has_accepted_extension(filename: &str) -> bool {
    get_file_extension(filename)
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&format!(".{}", ext).as_str()))
        .unwrap_or(false)
}

/// Get content type for file
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    match get_file_extension(filename)?.as_str() {
        "pdf" => Some("application/pdf"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "doc" => Some("application/msword"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        _ => None,
    }
}

/// Read a document from disk into an upload
pub async fn load_upload(path: &Path) -> Result<UploadFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
        .to_string();

    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let mut upload = UploadFile::new(name, content);
    if let Some(content_type) = content_type_for(&upload.name) {
        upload = upload.with_mime_type(content_type);
    }
    Ok(upload)
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}
