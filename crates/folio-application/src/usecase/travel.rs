//! Travel use cases, including gallery editing.

use super::admin::AdminGate;
use crate::editor::{
    CleanupWarning, ContentEditor, EditSession, ProgressSink, SaveError, SaveReport,
};
use folio_core::error::{FolioError, Result};
use folio_core::image::DEFAULT_MAX_IMAGE_BYTES;
use folio_core::lifestyle::{Travel, TravelFields};
use folio_core::repository::Repository;
use folio_core::stats::{self, TravelStats};
use folio_core::storage::ObjectStorage;
use folio_core::store::{Filter, Query};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct TravelUseCase {
    editor: ContentEditor<Travel>,
    gate: AdminGate,
    max_image_bytes: usize,
}

impl TravelUseCase {
    pub fn new(
        repository: Arc<dyn Repository<Travel>>,
        storage: Arc<dyn ObjectStorage>,
        gate: AdminGate,
    ) -> Self {
        Self {
            editor: ContentEditor::new(repository, storage),
            gate,
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

    fn repository(&self) -> &Arc<dyn Repository<Travel>> {
        self.editor.repository()
    }

    pub async fn list(&self) -> Result<Vec<Travel>> {
        self.repository().list_all().await
    }

    pub async fn featured(&self) -> Result<Vec<Travel>> {
        self.repository()
            .list(Query::new().filter(Filter::eq("featured", true)))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Travel>> {
        self.repository().find_by_id(id).await
    }

    /// Travels in `country`, compared case-insensitively.
    pub async fn by_country(&self, country: &str) -> Result<Vec<Travel>> {
        let wanted = country.trim().to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|t| t.fields.country.to_lowercase() == wanted)
            .collect())
    }

    pub async fn stats(&self) -> Result<TravelStats> {
        Ok(stats::travel_stats(&self.list().await?))
    }

    pub async fn open_editor(&self, id: Option<&str>) -> Result<EditSession> {
        let session = match id {
            None => EditSession::new(),
            Some(id) => {
                let travel = self
                    .get(id)
                    .await?
                    .ok_or_else(|| FolioError::not_found("travel", id))?;
                EditSession::for_record(travel.id, &travel.fields)
            }
        };
        Ok(session.with_max_image_bytes(self.max_image_bytes))
    }

    pub async fn save(
        &self,
        session: &mut EditSession,
        fields: TravelFields,
        cancel: &CancellationToken,
    ) -> std::result::Result<SaveReport<Travel>, SaveError> {
        self.gate.require_admin().await.map_err(SaveError::Forbidden)?;
        self.editor.save(session, fields, cancel).await
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<CleanupWarning>> {
        self.gate.require_admin().await?;
        let Some(travel) = self.get(id).await? else {
            return Ok(Vec::new());
        };

        self.repository().delete(id).await?;
        tracing::info!("Deleted travel {}", id);
        Ok(self.editor.delete_images(&travel.fields.images).await)
    }
}
