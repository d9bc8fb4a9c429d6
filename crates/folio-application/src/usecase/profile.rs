//! Profile use cases.

use super::admin::AdminGate;
use folio_core::error::Result;
use folio_core::profile::{Profile, ProfileFields};
use folio_core::repository::Repository;
use folio_core::skill;
use std::sync::Arc;

/// Reads and writes the singleton profile.
pub struct ProfileUseCase {
    repository: Arc<dyn Repository<Profile>>,
    gate: AdminGate,
    profile_id: String,
}

impl ProfileUseCase {
    pub fn new(
        repository: Arc<dyn Repository<Profile>>,
        gate: AdminGate,
        profile_id: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            gate,
            profile_id: profile_id.into(),
        }
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub async fn get_profile(&self) -> Result<Option<Profile>> {
        self.repository.find_by_id(&self.profile_id).await
    }

    /// Creates or overwrites the profile.
    ///
    /// Skills are deduplicated case-insensitively, keeping the first casing.
    pub async fn save_profile(&self, mut fields: ProfileFields) -> Result<Profile> {
        self.gate.require_admin().await?;
        fields.validate()?;
        fields.skills = skill::missing_skills(&[], &fields.skills);

        let saved = match self.repository.find_by_id(&self.profile_id).await? {
            Some(_) => self.repository.update(&self.profile_id, &fields).await?,
            None => {
                self.repository
                    .create_with_id(&self.profile_id, &fields)
                    .await?
            }
        };
        tracing::info!("Saved profile {}", self.profile_id);
        Ok(saved)
    }
}
