//! Profile domain model.

use crate::store::Document;
use crate::validation::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the profile document when none is configured.
pub const DEFAULT_PROFILE_ID: &str = "main-profile";

/// A link shown in the profile's social section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

/// Writable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub name: String,
    pub title: String,
    pub bio: String,
    #[serde(default)]
    pub profile_image: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    /// Display order is insertion order; uniqueness is case-insensitive.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl ProfileFields {
    pub fn validate(&self) -> crate::error::Result<()> {
        Validator::new()
            .min_len("Name", &self.name, 2)
            .required("Title", &self.title)
            .required("Email", &self.email)
            .finish()
    }
}

/// The portfolio owner's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    #[serde(flatten)]
    pub fields: ProfileFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Profile {
    type Fields = ProfileFields;
    const COLLECTION: &'static str = "profile";
    const ENTITY_NAME: &'static str = "profile";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &ProfileFields {
        &self.fields
    }
}
