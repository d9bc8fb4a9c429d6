//! Project use cases, including gallery editing.

use super::admin::AdminGate;
use super::experience::dropped_technologies;
use crate::editor::{
    CleanupWarning, ContentEditor, EditSession, ProgressSink, SaveError, SaveReport,
};
use crate::skill_sync::SkillSyncDispatcher;
use folio_core::error::{FolioError, Result};
use folio_core::image::DEFAULT_MAX_IMAGE_BYTES;
use folio_core::project::{Project, ProjectFields};
use folio_core::repository::Repository;
use folio_core::stats::{self, ProjectStats};
use folio_core::storage::ObjectStorage;
use folio_core::store::{Filter, Query};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct ProjectUseCase {
    editor: ContentEditor<Project>,
    gate: AdminGate,
    sync: Arc<dyn SkillSyncDispatcher>,
    max_image_bytes: usize,
}

impl ProjectUseCase {
    pub fn new(
        repository: Arc<dyn Repository<Project>>,
        storage: Arc<dyn ObjectStorage>,
        gate: AdminGate,
        sync: Arc<dyn SkillSyncDispatcher>,
    ) -> Self {
        Self {
            editor: ContentEditor::new(repository, storage),
            gate,
            sync,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Reports upload progress of gallery saves to `sink`.
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.editor = self.editor.with_progress(sink);
        self
    }

    fn repository(&self) -> &Arc<dyn Repository<Project>> {
        self.editor.repository()
    }

    /// All projects, most recent start first.
    pub async fn list(&self) -> Result<Vec<Project>> {
        self.repository().list_all().await
    }

    pub async fn featured(&self) -> Result<Vec<Project>> {
        self.repository()
            .list(Query::new().filter(Filter::eq("featured", true)))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Project>> {
        self.repository().find_by_id(id).await
    }

    pub async fn stats(&self) -> Result<ProjectStats> {
        Ok(stats::project_stats(&self.list().await?))
    }

    /// Opens an editor session for a new project (`None`) or an existing one.
    pub async fn open_editor(&self, id: Option<&str>) -> Result<EditSession> {
        let session = match id {
            None => EditSession::new(),
            Some(id) => {
                let project = self
                    .get(id)
                    .await?
                    .ok_or_else(|| FolioError::not_found("project", id))?;
                EditSession::for_record(project.id, &project.fields)
            }
        };
        Ok(session.with_max_image_bytes(self.max_image_bytes))
    }

    /// Saves the project and its gallery, then queues skill sync.
    ///
    /// Sync is also queued when a failed save leaves a newly created record
    /// behind.
    pub async fn save(
        &self,
        session: &mut EditSession,
        fields: ProjectFields,
        cancel: &CancellationToken,
    ) -> std::result::Result<SaveReport<Project>, SaveError> {
        self.gate.require_admin().await.map_err(SaveError::Forbidden)?;

        let previous = match session.entity_id() {
            Some(id) => self
                .repository()
                .find_by_id(id)
                .await
                .map_err(SaveError::UpdateFailed)?
                .map(|p| p.fields.technologies),
            None => None,
        };

        let creating = session.entity_id().is_none();
        let declared = fields.technologies.clone();
        let report = match self.editor.save(session, fields, cancel).await {
            Ok(report) => report,
            Err(err) => {
                // A record created before the failing step already declares
                // its technologies.
                if creating && session.entity_id().is_some() {
                    self.sync.dispatch_sync(declared);
                }
                return Err(err);
            }
        };

        let technologies = report.record.fields.technologies.clone();
        let dropped = previous
            .map(|before| dropped_technologies(&before, &technologies))
            .unwrap_or(false);
        self.sync.dispatch_sync(technologies);
        if dropped {
            self.sync.dispatch_cleanup();
        }
        Ok(report)
    }

    /// Deletes the project, then its stored images, then queues skill cleanup.
    ///
    /// Images are only touched once the record is gone; failures to delete
    /// them are returned as warnings.
    pub async fn delete(&self, id: &str) -> Result<Vec<CleanupWarning>> {
        self.gate.require_admin().await?;
        let Some(project) = self.get(id).await? else {
            return Ok(Vec::new());
        };

        self.repository().delete(id).await?;
        tracing::info!("Deleted project {}", id);
        let warnings = self.editor.delete_images(&project.fields.images).await;
        self.sync.dispatch_cleanup();
        Ok(warnings)
    }
}
