use std::path::Path;

use bytes::Bytes;

use crate::error::{Error, Result};

/// A local file ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name sent with the part.
    pub name: String,

    /// MIME type sent with the part.
    pub mime: String,

    /// File contents.
    pub bytes: Bytes,
}

impl FileUpload {
    /// Creates an upload from in-memory contents, guessing the MIME type from the name.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = mime_for_name(&name).to_string();
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Overrides the MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Reads a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::validation(
                    format!("{} has no usable file name", path.display()),
                    Some("path".to_string()),
                )
            })?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        Ok(Self::new(name, bytes))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased extension including the dot, e.g. `.pdf`.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
    }
}

/// Guesses a MIME type from a file name's extension.
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
