//! Travel and hobby domain models.

use crate::image::{GalleryFields, GalleryKind};
use crate::store::{Document, OrderBy};
use crate::validation::Validator;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Writable travel fields, including the persisted image list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelFields {
    pub country: String,
    pub city: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub visit_date: NaiveDate,
    /// Length of the trip in days.
    pub duration: u32,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub featured: bool,
}

impl GalleryFields for TravelFields {
    const KIND: GalleryKind = GalleryKind::Travel;

    fn images(&self) -> &[String] {
        &self.images
    }

    fn set_images(&mut self, images: Vec<String>) {
        self.images = images;
    }

    fn validate(&self) -> crate::error::Result<()> {
        let mut v = Validator::new();
        v.min_len("Title", &self.title, 2)
            .min_len("Country", &self.country, 2)
            .min_len("City", &self.city, 2)
            .min_len("Description", &self.description, 10)
            .check(self.duration >= 1, "Duration must be at least 1 day")
            .check(
                self.highlights.iter().all(|h| !h.trim().is_empty()),
                "Highlights must not be blank",
            );
        if let Some(coords) = self.coordinates {
            v.check(
                (-90.0..=90.0).contains(&coords.latitude)
                    && (-180.0..=180.0).contains(&coords.longitude),
                "Coordinates are out of range",
            );
        }
        v.finish()
    }
}

/// A trip shown on the travel page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    pub id: String,
    #[serde(flatten)]
    pub fields: TravelFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Travel {
    type Fields = TravelFields;
    const COLLECTION: &'static str = "travels";
    const ENTITY_NAME: &'static str = "travel";

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("visitDate"))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &TravelFields {
        &self.fields
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HobbyCategory {
    Sports,
    Arts,
    Music,
    Technology,
    Travel,
    Reading,
    Gaming,
    Cooking,
    Photography,
    #[default]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HobbyFields {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: HobbyCategory,
    #[serde(default)]
    pub started_date: Option<NaiveDate>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl HobbyFields {
    pub fn validate(&self) -> crate::error::Result<()> {
        Validator::new()
            .min_len("Name", &self.name, 2)
            .min_len("Description", &self.description, 10)
            .check(
                self.achievements.iter().all(|a| !a.trim().is_empty()),
                "Achievements must not be blank",
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hobby {
    pub id: String,
    #[serde(flatten)]
    pub fields: HobbyFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Hobby {
    type Fields = HobbyFields;
    const COLLECTION: &'static str = "hobbies";
    const ENTITY_NAME: &'static str = "hobby";

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::asc("name"))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &HobbyFields {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn travel_fields() -> TravelFields {
        TravelFields {
            country: "Japan".to_string(),
            city: "Kyoto".to_string(),
            title: "Temples".to_string(),
            description: "Two weeks of temples and tea".to_string(),
            images: vec![],
            visit_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            duration: 14,
            highlights: vec!["Fushimi Inari".to_string()],
            coordinates: Some(Coordinates {
                latitude: 35.0,
                longitude: 135.7,
            }),
            featured: true,
        }
    }

    #[test]
    fn test_valid_travel_passes() {
        assert!(travel_fields().validate().is_ok());
    }

    #[test]
    fn test_travel_rejects_zero_duration_and_blank_highlight() {
        let mut fields = travel_fields();
        fields.duration = 0;
        fields.highlights.push("  ".to_string());

        let err = fields.validate().unwrap_err().to_string();
        assert!(err.contains("Duration must be at least 1 day"));
        assert!(err.contains("Highlights must not be blank"));
    }
}
