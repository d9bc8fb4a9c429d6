//! Reconciles the profile's skills with experience and project technologies.

use folio_core::clock::Clock;
use folio_core::error::{FolioError, Result};
use folio_core::experience::Experience;
use folio_core::profile::Profile;
use folio_core::project::Project;
use folio_core::repository::Repository;
use folio_core::skill::{self, SkillStatistics};
use folio_core::stats::Timeline;
use std::fmt;
use std::sync::Arc;

/// Result of a reconciliation that may or may not have written the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The profile was written; carries the resulting skill list.
    Updated(Vec<String>),
    NoOp,
}

impl SyncOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, SyncOutcome::Updated(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    Sync,
    Cleanup,
    Statistics,
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncOperation::Sync => "sync",
            SyncOperation::Cleanup => "cleanup",
            SyncOperation::Statistics => "statistics",
        };
        f.write_str(name)
    }
}

/// A swallowed skill synchronization failure.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncWarning {
    pub operation: SyncOperation,
    pub message: String,
}

impl SyncWarning {
    pub fn new(operation: SyncOperation, error: &FolioError) -> Self {
        Self {
            operation,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill {} failed: {}", self.operation, self.message)
    }
}

/// Skill synchronization engine.
///
/// The `try_*` methods report failures; the plain methods swallow them as
/// a logged [`SyncWarning`] and resolve to a harmless result.
pub struct SkillSyncService {
    profiles: Arc<dyn Repository<Profile>>,
    experiences: Arc<dyn Repository<Experience>>,
    projects: Arc<dyn Repository<Project>>,
    profile_id: String,
    clock: Arc<dyn Clock>,
}

impl SkillSyncService {
    pub fn new(
        profiles: Arc<dyn Repository<Profile>>,
        experiences: Arc<dyn Repository<Experience>>,
        projects: Arc<dyn Repository<Project>>,
        profile_id: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            experiences,
            projects,
            profile_id: profile_id.into(),
            clock,
        }
    }

    /// Appends technologies missing from the profile's skills.
    pub async fn try_sync_skills(&self, technologies: &[String]) -> Result<SyncOutcome> {
        let Some(profile) = self.profiles.find_by_id(&self.profile_id).await? else {
            tracing::debug!(
                target: "skill_sync",
                "No profile '{}', nothing to sync",
                self.profile_id
            );
            return Ok(SyncOutcome::NoOp);
        };

        let missing = skill::missing_skills(&profile.fields.skills, technologies);
        if missing.is_empty() {
            return Ok(SyncOutcome::NoOp);
        }

        let mut fields = profile.fields;
        fields.skills.extend(missing.iter().cloned());
        let updated = self.profiles.update(&profile.id, &fields).await?;
        tracing::info!(
            target: "skill_sync",
            "Added {} skill(s) to profile: {:?}",
            missing.len(),
            missing
        );
        Ok(SyncOutcome::Updated(updated.fields.skills))
    }

    /// Drops skills no experience or project references anymore.
    pub async fn try_cleanup_unused_skills(&self) -> Result<SyncOutcome> {
        let (profile, experiences, projects) = futures::try_join!(
            self.profiles.find_by_id(&self.profile_id),
            self.experiences.list_all(),
            self.projects.list_all(),
        )?;
        let Some(profile) = profile else {
            return Ok(SyncOutcome::NoOp);
        };

        let referenced = skill::referenced_keys(timelines(&experiences, &projects));
        let retained = skill::retain_referenced(&profile.fields.skills, &referenced);
        if retained.len() == profile.fields.skills.len() {
            return Ok(SyncOutcome::NoOp);
        }

        let removed = profile.fields.skills.len() - retained.len();
        let mut fields = profile.fields;
        fields.skills = retained;
        let updated = self.profiles.update(&profile.id, &fields).await?;
        tracing::info!(target: "skill_sync", "Removed {} unused skill(s) from profile", removed);
        Ok(SyncOutcome::Updated(updated.fields.skills))
    }

    pub async fn try_skills_statistics(&self) -> Result<SkillStatistics> {
        let (profile, experiences, projects) = futures::try_join!(
            self.profiles.find_by_id(&self.profile_id),
            self.experiences.list_all(),
            self.projects.list_all(),
        )?;
        let skills = profile.map(|p| p.fields.skills).unwrap_or_default();
        Ok(skill::skill_statistics(
            &skills,
            timelines(&experiences, &projects),
            self.clock.today(),
        ))
    }

    pub async fn sync_skills_to_profile(&self, technologies: &[String]) -> SyncOutcome {
        match self.try_sync_skills(technologies).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log_warning(&SyncWarning::new(SyncOperation::Sync, &e));
                SyncOutcome::NoOp
            }
        }
    }

    pub async fn cleanup_unused_skills(&self) -> SyncOutcome {
        match self.try_cleanup_unused_skills().await {
            Ok(outcome) => outcome,
            Err(e) => {
                log_warning(&SyncWarning::new(SyncOperation::Cleanup, &e));
                SyncOutcome::NoOp
            }
        }
    }

    pub async fn get_skills_statistics(&self) -> SkillStatistics {
        match self.try_skills_statistics().await {
            Ok(stats) => stats,
            Err(e) => {
                log_warning(&SyncWarning::new(SyncOperation::Statistics, &e));
                SkillStatistics::default()
            }
        }
    }
}

pub(crate) fn log_warning(warning: &SyncWarning) {
    tracing::warn!(target: "skill_sync", "{}", warning);
}

fn timelines<'a>(
    experiences: &'a [Experience],
    projects: &'a [Project],
) -> impl Iterator<Item = &'a dyn Timeline> {
    experiences
        .iter()
        .map(|e| e as &dyn Timeline)
        .chain(projects.iter().map(|p| p as &dyn Timeline))
}
