//! Experience use cases.
//!
//! Creating or changing an experience queues a skill sync for its
//! technologies; deleting one, or dropping technologies from it, queues a
//! cleanup of unused skills.

use super::admin::AdminGate;
use crate::skill_sync::SkillSyncDispatcher;
use folio_core::clock::Clock;
use folio_core::error::{FolioError, Result};
use folio_core::experience::{Experience, ExperienceFields};
use folio_core::repository::Repository;
use folio_core::skill::skill_key;
use folio_core::stats::{self, ExperienceStats, TechnologyExperience};
use std::collections::HashSet;
use std::sync::Arc;

pub struct ExperienceUseCase {
    repository: Arc<dyn Repository<Experience>>,
    gate: AdminGate,
    sync: Arc<dyn SkillSyncDispatcher>,
    clock: Arc<dyn Clock>,
}

impl ExperienceUseCase {
    pub fn new(
        repository: Arc<dyn Repository<Experience>>,
        gate: AdminGate,
        sync: Arc<dyn SkillSyncDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            gate,
            sync,
            clock,
        }
    }

    /// All experiences, most recent start first.
    pub async fn list(&self) -> Result<Vec<Experience>> {
        self.repository.list_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Experience>> {
        self.repository.find_by_id(id).await
    }

    /// The first ongoing experience, if any.
    pub async fn current(&self) -> Result<Option<Experience>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|e| e.fields.tenure.is_ongoing()))
    }

    /// Sorted distinct technologies across all experiences.
    pub async fn all_skills(&self) -> Result<Vec<String>> {
        Ok(stats::all_technologies(&self.list().await?))
    }

    pub async fn skills_with_experience(&self) -> Result<Vec<TechnologyExperience>> {
        Ok(stats::technology_experience(&self.list().await?, self.clock.today()))
    }

    pub async fn stats(&self) -> Result<ExperienceStats> {
        Ok(stats::experience_stats(&self.list().await?, self.clock.today()))
    }

    pub async fn create(&self, fields: ExperienceFields) -> Result<Experience> {
        self.gate.require_admin().await?;
        fields.validate()?;
        let created = self.repository.create(&fields).await?;
        tracing::info!("Created experience {} at {}", created.id, fields.company);
        self.sync.dispatch_sync(fields.technologies);
        Ok(created)
    }

    pub async fn update(&self, id: &str, fields: ExperienceFields) -> Result<Experience> {
        self.gate.require_admin().await?;
        fields.validate()?;
        let previous = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| FolioError::not_found("experience", id))?;

        let updated = self.repository.update(id, &fields).await?;
        let dropped = dropped_technologies(&previous.fields.technologies, &fields.technologies);
        self.sync.dispatch_sync(fields.technologies);
        if dropped {
            self.sync.dispatch_cleanup();
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gate.require_admin().await?;
        self.repository.delete(id).await?;
        tracing::info!("Deleted experience {}", id);
        self.sync.dispatch_cleanup();
        Ok(())
    }
}

/// Whether `after` lost a technology that `before` listed.
pub(crate) fn dropped_technologies(before: &[String], after: &[String]) -> bool {
    let kept: HashSet<String> = after.iter().map(|t| skill_key(t)).collect();
    before.iter().any(|t| !kept.contains(&skill_key(t)))
}
