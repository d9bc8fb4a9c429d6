//! Hobby use cases.

use super::admin::AdminGate;
use folio_core::error::{FolioError, Result};
use folio_core::lifestyle::{Hobby, HobbyCategory, HobbyFields};
use folio_core::repository::Repository;
use folio_core::stats::{self, HobbyStats};
use folio_core::store::{Filter, Query};
use std::sync::Arc;

pub struct HobbyUseCase {
    repository: Arc<dyn Repository<Hobby>>,
    gate: AdminGate,
}

impl HobbyUseCase {
    pub fn new(repository: Arc<dyn Repository<Hobby>>, gate: AdminGate) -> Self {
        Self { repository, gate }
    }

    pub async fn list(&self) -> Result<Vec<Hobby>> {
        self.repository.list_all().await
    }

    pub async fn featured(&self) -> Result<Vec<Hobby>> {
        self.repository
            .list(Query::new().filter(Filter::eq("featured", true)))
            .await
    }

    pub async fn by_category(&self, category: HobbyCategory) -> Result<Vec<Hobby>> {
        self.repository
            .list(Query::new().filter(Filter::eq("category", category.to_string())))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Hobby>> {
        self.repository.find_by_id(id).await
    }

    pub async fn stats(&self) -> Result<HobbyStats> {
        Ok(stats::hobby_stats(&self.list().await?))
    }

    pub async fn create(&self, fields: HobbyFields) -> Result<Hobby> {
        self.gate.require_admin().await?;
        fields.validate()?;
        self.repository.create(&fields).await
    }

    pub async fn update(&self, id: &str, fields: HobbyFields) -> Result<Hobby> {
        self.gate.require_admin().await?;
        fields.validate()?;
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(FolioError::not_found("hobby", id));
        }
        self.repository.update(id, &fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gate.require_admin().await?;
        self.repository.delete(id).await
    }
}
