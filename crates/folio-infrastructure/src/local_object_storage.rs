//! Local-filesystem object storage.
//!
//! Objects live under a root directory at their storage path; references are
//! `{public_base_url}/{path}` so they can be served by any static file
//! server pointed at the root.

use async_trait::async_trait;
use folio_core::error::{FolioError, Result};
use folio_core::image::StagedFile;
use folio_core::storage::{ObjectStorage, ProgressCallback};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Bytes written between two progress reports.
const CHUNK_SIZE: usize = 64 * 1024;

pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Download reference for a storage path.
    pub fn reference_for(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }

    /// Storage path behind a reference produced by this storage.
    pub fn path_of<'a>(&self, reference: &'a str) -> Option<&'a str> {
        reference
            .strip_prefix(self.public_base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
    }

    /// Maps a storage path to a file below the root, refusing anything that
    /// would leave it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let is_plain = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(FolioError::security(format!("Invalid storage path '{path}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(
        &self,
        file: &StagedFile,
        path: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut out = fs::File::create(&target).await.map_err(|e| {
            FolioError::storage(format!("Failed to create object {path}: {e}"))
        })?;

        let total = file.data.len().max(1);
        let mut written = 0usize;
        if let Some(report) = &on_progress {
            report(0);
        }
        for chunk in file.data.chunks(CHUNK_SIZE) {
            out.write_all(chunk)
                .await
                .map_err(|e| FolioError::storage(format!("Failed to write object {path}: {e}")))?;
            written += chunk.len();
            if let Some(report) = &on_progress {
                report(((written * 100) / total).min(100) as u8);
            }
        }
        out.sync_all().await?;
        if let Some(report) = &on_progress {
            report(100);
        }

        tracing::debug!(
            "Stored object {} ({} bytes, {})",
            path,
            file.data.len(),
            file.content_type
        );
        Ok(self.reference_for(path))
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let path = self.path_of(reference).ok_or_else(|| {
            FolioError::storage(format!("Reference '{reference}' is not managed by this storage"))
        })?;
        let target = self.resolve(path)?;
        match fs::remove_file(&target).await {
            Ok(()) => {
                tracing::debug!("Deleted object {}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FolioError::storage(format!(
                "Failed to delete object {path}: {e}"
            ))),
        }
    }
}

/// Infers the MIME type from a filename extension using the `mime_guess` library.
pub fn infer_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// Reads a local file into a [`StagedFile`], guessing its content type.
pub async fn staged_file_from_path(path: &Path) -> Result<StagedFile> {
    let data = fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FolioError::io(format!("Invalid file name: {}", path.display())))?
        .to_string();
    let content_type = infer_content_type(&name);
    Ok(StagedFile::new(name, content_type, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> LocalObjectStorage {
        LocalObjectStorage::new(dir.path(), "http://cdn.test/objects/")
    }

    #[tokio::test]
    async fn test_upload_reports_progress_and_returns_reference() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let file = StagedFile::new("a.png", "image/png", vec![7u8; CHUNK_SIZE * 2 + 10]);

        let seen = Arc::new(Mutex::new(Vec::<u8>::new()));
        let sink = seen.clone();
        let callback: ProgressCallback = Arc::new(move |p: u8| sink.lock().unwrap().push(p));
        let reference = storage
            .upload(&file, "projects/p1/images/a.png", Some(callback))
            .await
            .unwrap();

        assert_eq!(reference, "http://cdn.test/objects/projects/p1/images/a.png");
        assert!(dir.path().join("projects/p1/images/a.png").exists());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let file = StagedFile::new("b.jpg", "image/jpeg", vec![1, 2, 3]);
        let reference = storage.upload(&file, "travels/t1/images/b.jpg", None).await.unwrap();

        storage.delete(&reference).await.unwrap();
        storage.delete(&reference).await.unwrap();
        assert!(!dir.path().join("travels/t1/images/b.jpg").exists());
    }

    #[tokio::test]
    async fn test_rejects_foreign_references_and_traversal() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        assert!(storage.delete("https://elsewhere/x.png").await.is_err());

        let file = StagedFile::new("c.gif", "image/gif", vec![0]);
        let err = storage.upload(&file, "../escape.gif", None).await.unwrap_err();
        assert!(err.is_security());
    }

    #[test]
    fn test_infer_content_type() {
        assert_eq!(infer_content_type("photo.JPG"), "image/jpeg");
        assert_eq!(infer_content_type("unknown"), "application/octet-stream");
    }
}
