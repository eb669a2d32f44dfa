//! Files selected in the receipt input.

use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};

/// Where a selected file's contents live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Memory(Bytes),
    Path(PathBuf),
}

/// A file picked in the receipt input, with the MIME type the client declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            source: FileSource::Memory(data.into()),
        }
    }

    /// File on disk; the declared type is guessed from the extension unless given.
    pub fn from_path(path: impl Into<PathBuf>, mime_type: Option<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mime_type = mime_type.unwrap_or_else(|| mime_for_path(&path).to_string());
        Self {
            name,
            mime_type,
            source: FileSource::Path(path),
        }
    }

    /// Read the whole file
    pub async fn read(&self) -> io::Result<Bytes> {
        match &self.source {
            FileSource::Memory(data) => Ok(data.clone()),
            FileSource::Path(path) => tokio::fs::read(path).await.map(Bytes::from),
        }
    }
}

/// MIME type a browser would report for the file's extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Change event of the receipt input
///
/// `value` is the input's raw value (a path such as `C:\fakepath\receipt.png`).
/// Only the first of `files` is used: one receipt per bill.
#[derive(Debug, Clone, Default)]
pub struct FileChangeEvent {
    pub value: String,
    pub files: Vec<SelectedFile>,
}

impl FileChangeEvent {
    pub fn single(value: impl Into<String>, file: SelectedFile) -> Self {
        Self {
            value: value.into(),
            files: vec![file],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guess_from_extension() {
        assert_eq!(mime_for_path(Path::new("a/receipt.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("receipt.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("scan.pdf")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn reads_memory_and_disk_files() {
        let memory = SelectedFile::from_bytes("a.png", "image/png", vec![1u8, 2, 3]);
        assert_eq!(memory.read().await.unwrap().as_ref(), &[1, 2, 3]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let disk = SelectedFile::from_path(&path, None);
        assert_eq!(disk.name, "receipt.jpg");
        assert_eq!(disk.mime_type, "image/jpeg");
        assert_eq!(disk.read().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn missing_file_read_fails() {
        let file = SelectedFile::from_path("/definitely/not/here.png", None);
        assert!(file.read().await.is_err());
    }
}
