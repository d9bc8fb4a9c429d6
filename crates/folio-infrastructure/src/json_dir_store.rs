//! Directory-backed document store.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! ├── profile/
//! │   └── main-profile.json
//! └── projects/
//!     ├── 3f2c...e1.json
//!     └── 9ab0...42.json
//! ```
//!
//! Every write goes to a temporary file in the same directory, is synced and
//! then renamed over the target, so readers never observe a partial
//! document.

use crate::{query, stamp};
use async_trait::async_trait;
use folio_core::clock::{Clock, SystemClock};
use folio_core::error::{FolioError, Result};
use folio_core::store::{DocumentStore, Query, RawDocument};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const EXTENSION: &str = "json";

/// [`DocumentStore`] persisting one pretty-printed JSON file per document.
pub struct JsonDirDocumentStore {
    base_dir: PathBuf,
    clock: Arc<dyn Clock>,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonDirDocumentStore {
    pub async fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_clock(base_dir, Arc::new(SystemClock)).await
    }

    pub async fn with_clock(base_dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await.map_err(|e| {
            FolioError::io(format!(
                "Failed to create document directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self {
            base_dir,
            clock,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        check_segment(collection)?;
        Ok(self.base_dir.join(collection))
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf> {
        check_segment(id)?;
        Ok(self.collection_dir(collection)?.join(format!("{id}.{EXTENSION}")))
    }

    async fn read(&self, path: &Path) -> Result<Option<RawDocument>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let document: RawDocument = serde_json::from_str(&content)?;
        Ok(Some(document))
    }

    async fn write(&self, path: &Path, document: &RawDocument) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| FolioError::internal("Document path has no parent directory"))?;
        fs::create_dir_all(parent).await?;

        let json = serde_json::to_string_pretty(document)?;
        let tmp_path = path.with_extension(format!("{EXTENSION}.tmp"));
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(json.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, path).await?;
        Ok(())
    }

    async fn load_existing(&self, collection: &str, id: &str) -> Result<(PathBuf, RawDocument)> {
        let path = self.document_path(collection, id)?;
        let document = self
            .read(&path)
            .await?
            .ok_or_else(|| FolioError::not_found("document", format!("{collection}/{id}")))?;
        Ok((path, document))
    }
}

/// Rejects ids and collection names that would escape the base directory.
fn check_segment(segment: &str) -> Result<()> {
    let valid = !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(FolioError::security(format!("Invalid path segment '{segment}'")))
    }
}

#[async_trait]
impl DocumentStore for JsonDirDocumentStore {
    async fn create(&self, collection: &str, document: RawDocument) -> Result<RawDocument> {
        let id = stamp::new_id();
        self.create_with_id(collection, &id, document).await
    }

    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        document: RawDocument,
    ) -> Result<RawDocument> {
        let path = self.document_path(collection, id)?;
        let _guard = self.write_lock.lock().await;
        if fs::try_exists(&path).await? {
            return Err(FolioError::data_access(format!(
                "Document '{collection}/{id}' already exists"
            )));
        }
        let stored = stamp::stamp_new(document, id, self.clock.now());
        self.write(&path, &stored).await?;
        tracing::debug!("Created document {}/{}", collection, id);
        Ok(stored)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<RawDocument>> {
        let path = self.document_path(collection, id)?;
        self.read(&path).await
    }

    async fn get_all(&self, collection: &str, query: &Query) -> Result<Vec<RawDocument>> {
        let dir = self.collection_dir(collection)?;
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match self.read(&path).await {
                Ok(Some(document)) => documents.push(document),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable document {}: {}", path.display(), e);
                }
            }
        }

        query::natural_order(&mut documents);
        Ok(query::apply(documents, query))
    }

    async fn update(&self, collection: &str, id: &str, patch: RawDocument) -> Result<RawDocument> {
        let _guard = self.write_lock.lock().await;
        let (path, mut document) = self.load_existing(collection, id).await?;
        stamp::merge_patch(&mut document, patch, self.clock.now());
        self.write(&path, &document).await?;
        Ok(document)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let path = self.document_path(collection, id)?;
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn increment(&self, collection: &str, id: &str, field: &str, delta: i64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let (path, mut document) = self.load_existing(collection, id).await?;
        stamp::apply_increment(&mut document, field, delta, self.clock.now());
        self.write(&path, &document).await
    }
}
