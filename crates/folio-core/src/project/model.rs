//! Project domain model.

use crate::image::{GalleryFields, GalleryKind};
use crate::store::{Document, OrderBy};
use crate::validation::Validator;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectCategory {
    WebApplication,
    MobileApp,
    DesktopApp,
    Api,
    Library,
    #[default]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    #[default]
    Planned,
    Archived,
}

/// Writable project fields, including the persisted image list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub short_description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    pub category: ProjectCategory,
    #[serde(default)]
    pub featured: bool,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub challenges: Option<String>,
    #[serde(default)]
    pub solutions: Option<String>,
}

impl GalleryFields for ProjectFields {
    const KIND: GalleryKind = GalleryKind::Project;

    fn images(&self) -> &[String] {
        &self.images
    }

    fn set_images(&mut self, images: Vec<String>) {
        self.images = images;
    }

    fn validate(&self) -> crate::error::Result<()> {
        let mut v = Validator::new();
        v.required("Title", &self.title)
            .required("Short description", &self.short_description)
            .required("Description", &self.description);
        if let Some(end) = self.end_date {
            v.check(end >= self.start_date, "End date must not precede start date");
        }
        v.finish()
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(flatten)]
    pub fields: ProjectFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Project {
    type Fields = ProjectFields;
    const COLLECTION: &'static str = "projects";
    const ENTITY_NAME: &'static str = "project";

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("startDate"))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &ProjectFields {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_wire_format() {
        assert_eq!(ProjectCategory::WebApplication.to_string(), "web-application");
        assert_eq!(
            ProjectStatus::from_str("in-progress").unwrap(),
            ProjectStatus::InProgress
        );
        assert_eq!(
            serde_json::to_value(ProjectCategory::MobileApp).unwrap(),
            serde_json::json!("mobile-app")
        );
    }
}
