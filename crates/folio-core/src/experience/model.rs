//! Experience and education domain models.

use crate::store::{Document, OrderBy};
use crate::validation::Validator;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// End boundary of a time-boxed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "endDate", rename_all = "camelCase")]
pub enum Tenure {
    /// Still running; durations use "now" as the end.
    Ongoing,
    /// Finished on the given date.
    Ended(NaiveDate),
}

impl Default for Tenure {
    fn default() -> Self {
        Tenure::Ongoing
    }
}

impl Tenure {
    pub fn is_ongoing(&self) -> bool {
        matches!(self, Tenure::Ongoing)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            Tenure::Ongoing => None,
            Tenure::Ended(date) => Some(*date),
        }
    }
}

/// Writable experience fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceFields {
    pub company: String,
    pub position: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub tenure: Tenure,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
}

impl ExperienceFields {
    pub fn validate(&self) -> crate::error::Result<()> {
        let mut v = Validator::new();
        v.min_len("Company", &self.company, 2)
            .min_len("Position", &self.position, 2)
            .min_len("Description", &self.description, 10);
        if let Tenure::Ended(end) = self.tenure {
            v.check(end >= self.start_date, "End date must not precede start date");
        }
        v.check(
            self.achievements.iter().all(|a| !a.trim().is_empty()),
            "Achievements must not be blank",
        );
        v.finish()
    }
}

/// A position held at a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(flatten)]
    pub fields: ExperienceFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Experience {
    type Fields = ExperienceFields;
    const COLLECTION: &'static str = "experiences";
    const ENTITY_NAME: &'static str = "experience";

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("startDate"))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &ExperienceFields {
        &self.fields
    }
}

/// Writable education fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationFields {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub tenure: Tenure,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl EducationFields {
    pub fn validate(&self) -> crate::error::Result<()> {
        let mut v = Validator::new();
        v.min_len("Institution", &self.institution, 2)
            .min_len("Degree", &self.degree, 2)
            .min_len("Field of study", &self.field_of_study, 2);
        if let Tenure::Ended(end) = self.tenure {
            v.check(end >= self.start_date, "End date must not precede start date");
        }
        v.finish()
    }
}

/// A degree or course of study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    #[serde(flatten)]
    pub fields: EducationFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Education {
    type Fields = EducationFields;
    const COLLECTION: &'static str = "education";
    const ENTITY_NAME: &'static str = "education";

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("startDate"))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &EducationFields {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tenure_serialization() {
        assert_eq!(
            serde_json::to_value(Tenure::Ended(date(2023, 7, 1))).unwrap(),
            json!({"state": "ended", "endDate": "2023-07-01"})
        );
        assert_eq!(
            serde_json::to_value(Tenure::Ongoing).unwrap(),
            json!({"state": "ongoing"})
        );
    }

    #[test]
    fn test_experience_validation() {
        let fields = ExperienceFields {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            description: "short".to_string(),
            location: String::new(),
            start_date: date(2023, 1, 1),
            tenure: Tenure::Ended(date(2022, 1, 1)),
            achievements: vec![],
            technologies: vec!["Go".to_string()],
            company_logo: None,
            company_website: None,
        };

        let err = fields.validate().unwrap_err().to_string();
        assert!(err.contains("Description must be at least 10 characters"));
        assert!(err.contains("End date must not precede start date"));
    }
}
