//! Education use cases.

use super::admin::AdminGate;
use folio_core::error::{FolioError, Result};
use folio_core::experience::{Education, EducationFields};
use folio_core::repository::Repository;
use folio_core::stats::{self, EducationStats};
use std::sync::Arc;

pub struct EducationUseCase {
    repository: Arc<dyn Repository<Education>>,
    gate: AdminGate,
}

impl EducationUseCase {
    pub fn new(repository: Arc<dyn Repository<Education>>, gate: AdminGate) -> Self {
        Self { repository, gate }
    }

    pub async fn list(&self) -> Result<Vec<Education>> {
        self.repository.list_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Education>> {
        self.repository.find_by_id(id).await
    }

    pub async fn stats(&self) -> Result<EducationStats> {
        Ok(stats::education_stats(&self.list().await?))
    }

    pub async fn create(&self, fields: EducationFields) -> Result<Education> {
        self.gate.require_admin().await?;
        fields.validate()?;
        self.repository.create(&fields).await
    }

    pub async fn update(&self, id: &str, fields: EducationFields) -> Result<Education> {
        self.gate.require_admin().await?;
        fields.validate()?;
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(FolioError::not_found("education", id));
        }
        self.repository.update(id, &fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gate.require_admin().await?;
        self.repository.delete(id).await
    }
}
