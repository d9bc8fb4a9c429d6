//! Transactional save for records that own an image gallery.

use super::session::EditSession;
use folio_core::error::FolioError;
use folio_core::image::GalleryFields;
use folio_core::repository::Repository;
use folio_core::storage::{ObjectStorage, ProgressCallback, generate_unique_name};
use folio_core::store::Document;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a save stopped. Every variant leaves storage without objects from
/// the failed invocation.
#[derive(Error, Debug, Clone)]
pub enum SaveError {
    /// The caller may not edit this record; nothing was written.
    #[error("Not allowed: {0}")]
    Forbidden(#[source] FolioError),

    /// Form validation failed; nothing was written.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// The new record could not be created; nothing to roll back.
    #[error("Failed to create record: {0}")]
    CreateFailed(#[source] FolioError),

    /// An upload failed; earlier uploads of this save were rolled back.
    #[error("Failed to upload {file_name}: {source}")]
    UploadFailed {
        file_name: String,
        #[source]
        source: FolioError,
    },

    /// The record write failed; this save's uploads were rolled back.
    #[error("Failed to update record: {0}")]
    UpdateFailed(#[source] FolioError),

    /// The save was cancelled; this save's uploads were rolled back.
    #[error("Save cancelled")]
    Cancelled,
}

/// A stored image that could not be deleted after a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWarning {
    pub url: String,
    pub message: String,
}

/// Upload progress of one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    pub file_name: String,
    /// Position of the file among this save's uploads, from 0.
    pub index: usize,
    pub total: usize,
    pub percent: u8,
}

pub type ProgressSink = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Outcome of a successful save.
#[derive(Debug, Clone)]
pub struct SaveReport<T> {
    pub record: T,
    /// Whether this save created the record.
    pub created: bool,
    /// References uploaded by this save, in upload order.
    pub uploaded: Vec<String>,
    pub cleanup_warnings: Vec<CleanupWarning>,
}

/// Runs the validate, create, upload, persist and cleanup sequence for a
/// gallery record.
///
/// Steps run strictly in order. Uploads are sequential so a failure leaves
/// a well-defined set of objects to roll back: exactly those uploaded by
/// the failing invocation. Pre-existing images are never deleted unless the
/// record write that drops them succeeded.
pub struct ContentEditor<T: Document> {
    repository: Arc<dyn Repository<T>>,
    storage: Arc<dyn ObjectStorage>,
    progress: Option<ProgressSink>,
}

impl<T> ContentEditor<T>
where
    T: Document,
    T::Fields: GalleryFields,
{
    pub fn new(repository: Arc<dyn Repository<T>>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            repository,
            storage,
            progress: None,
        }
    }

    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn repository(&self) -> &Arc<dyn Repository<T>> {
        &self.repository
    }

    pub fn storage(&self) -> &Arc<dyn ObjectStorage> {
        &self.storage
    }

    /// Saves `fields` together with the session's image changes.
    ///
    /// The image list in `fields` is ignored; the session decides it. On
    /// success the session is reset to the persisted image list.
    pub async fn save(
        &self,
        session: &mut EditSession,
        mut fields: T::Fields,
        cancel: &CancellationToken,
    ) -> Result<SaveReport<T>, SaveError> {
        let kind = <T::Fields as GalleryFields>::KIND;

        // 1. validate
        if let Err(e) = fields.validate() {
            return Err(SaveError::ValidationFailed(e.messages()));
        }
        if cancel.is_cancelled() {
            return Err(SaveError::Cancelled);
        }

        // 2. ensure the record exists
        let created = session.entity_id().is_none();
        let entity_id = match session.entity_id() {
            Some(id) => id.to_string(),
            None => {
                let mut empty = fields.clone();
                empty.set_images(Vec::new());
                let record = self
                    .repository
                    .create(&empty)
                    .await
                    .map_err(SaveError::CreateFailed)?;
                let id = record.id().to_string();
                tracing::info!(target: "editor", "Created {} {}", T::ENTITY_NAME, id);
                session.set_entity_id(id.clone());
                id
            }
        };

        // 3. upload staged images
        let staged: Vec<_> = session
            .images()
            .iter()
            .filter(|image| image.needs_upload())
            .filter_map(|image| image.source.clone())
            .collect();
        let mut pending_uploads: Vec<String> = Vec::with_capacity(staged.len());

        for (index, file) in staged.iter().enumerate() {
            if cancel.is_cancelled() {
                self.rollback(&pending_uploads).await;
                return Err(SaveError::Cancelled);
            }

            let unique_name = generate_unique_name(&file.name, Some(kind.prefix()));
            let path = kind.image_path(&entity_id, &unique_name);
            let callback = self.progress_callback(&file.name, index, staged.len());

            match self.storage.upload(file, &path, callback).await {
                Ok(reference) => {
                    tracing::debug!(target: "editor", "Uploaded {} to {}", file.name, path);
                    pending_uploads.push(reference);
                }
                Err(e) => {
                    tracing::error!(target: "editor", "Upload of {} failed: {}", file.name, e);
                    self.rollback(&pending_uploads).await;
                    return Err(SaveError::UploadFailed {
                        file_name: file.name.clone(),
                        source: e,
                    });
                }
            }
        }

        // 4. final image list: kept images, then this save's uploads
        let mut images: Vec<String> = session
            .images()
            .iter()
            .filter(|image| !image.is_new && !image.is_deleted)
            .map(|image| image.url.clone())
            .collect();
        images.extend(pending_uploads.iter().cloned());
        fields.set_images(images.clone());

        if cancel.is_cancelled() {
            self.rollback(&pending_uploads).await;
            return Err(SaveError::Cancelled);
        }

        // 5. persist
        let record = match self.repository.update(&entity_id, &fields).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(
                    target: "editor",
                    "Saving {} {} failed: {}",
                    T::ENTITY_NAME,
                    entity_id,
                    e
                );
                self.rollback(&pending_uploads).await;
                return Err(SaveError::UpdateFailed(e));
            }
        };

        // 6. cleanup images removed from the record
        let removed: Vec<String> = session
            .images()
            .iter()
            .filter(|image| image.needs_cleanup())
            .map(|image| image.url.clone())
            .collect();
        let cleanup_warnings = self.delete_images(&removed).await;

        session.commit(&images);
        tracing::info!(
            target: "editor",
            "Saved {} {} ({} uploaded, {} image(s))",
            T::ENTITY_NAME,
            entity_id,
            pending_uploads.len(),
            images.len()
        );

        Ok(SaveReport {
            record,
            created,
            uploaded: pending_uploads,
            cleanup_warnings,
        })
    }

    /// Best-effort deletion of stored images, e.g. after their record was
    /// deleted. Failures come back as warnings.
    pub async fn delete_images(&self, urls: &[String]) -> Vec<CleanupWarning> {
        let mut warnings = Vec::new();
        for url in urls {
            if let Err(e) = self.storage.delete(url).await {
                tracing::warn!(target: "editor", "Failed to delete image {}: {}", url, e);
                warnings.push(CleanupWarning {
                    url: url.clone(),
                    message: e.to_string(),
                });
            }
        }
        warnings
    }

    fn progress_callback(
        &self,
        file_name: &str,
        index: usize,
        total: usize,
    ) -> Option<ProgressCallback> {
        let sink = self.progress.clone()?;
        let file_name = file_name.to_string();
        let callback: ProgressCallback = Arc::new(move |percent: u8| {
            sink(UploadProgress {
                file_name: file_name.clone(),
                index,
                total,
                percent,
            })
        });
        Some(callback)
    }

    /// Best-effort removal of this invocation's uploads.
    async fn rollback(&self, pending_uploads: &[String]) {
        for reference in pending_uploads {
            match self.storage.delete(reference).await {
                Ok(()) => tracing::debug!(target: "editor", "Rolled back upload {}", reference),
                Err(e) => {
                    tracing::warn!(target: "editor", "Rollback of {} failed: {}", reference, e)
                }
            }
        }
    }
}
