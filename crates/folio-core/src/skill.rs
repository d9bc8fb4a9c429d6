//! Skill reconciliation between the profile and the records that
//! reference technologies.
//!
//! Skills and technologies are free-text labels matched case-insensitively.
//! The profile keeps the casing of the first time a skill was added.

use crate::stats::{Timeline, months_to_years};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Normalized form used for every skill comparison.
pub fn skill_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Technologies that match no existing skill, in input order.
///
/// Blank entries are skipped and candidates are deduplicated among
/// themselves, keeping the first casing seen.
pub fn missing_skills<S: AsRef<str>>(existing: &[String], candidates: &[S]) -> Vec<String> {
    let mut known: HashSet<String> = existing.iter().map(|s| skill_key(s)).collect();
    candidates
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty())
        .filter(|c| known.insert(skill_key(c)))
        .map(str::to_string)
        .collect()
}

/// Lowercased technologies referenced by any of the given records.
pub fn referenced_keys<'a, I>(records: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a dyn Timeline>,
{
    records
        .into_iter()
        .flat_map(|r| r.technologies().iter().map(|t| skill_key(t)))
        .collect()
}

/// Skills still referenced, in their original order.
pub fn retain_referenced(skills: &[String], referenced: &HashSet<String>) -> Vec<String> {
    skills
        .iter()
        .filter(|s| referenced.contains(&skill_key(s)))
        .cloned()
        .collect()
}

/// Usage of one profile skill across experiences and projects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillUsage {
    pub skill: String,
    /// Number of records referencing the skill.
    pub count: usize,
    /// Summed record spans in years; absent when no time was accumulated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStatistics {
    pub total_skills: usize,
    pub skills_with_experience: Vec<SkillUsage>,
    pub all_skills: Vec<String>,
}

/// Computes usage for every profile skill, in profile order.
///
/// A record counts once per skill even if it lists the technology twice
/// with different casing.
pub fn skill_usage<'a, I>(skills: &[String], records: I, today: NaiveDate) -> Vec<SkillUsage>
where
    I: IntoIterator<Item = &'a dyn Timeline>,
{
    let mut totals: HashMap<String, (usize, u32)> =
        skills.iter().map(|s| (skill_key(s), (0, 0))).collect();

    for record in records {
        let months = record.span_months(today);
        let keys: HashSet<String> = record.technologies().iter().map(|t| skill_key(t)).collect();
        for key in keys {
            if let Some(entry) = totals.get_mut(&key) {
                entry.0 += 1;
                entry.1 += months;
            }
        }
    }

    skills
        .iter()
        .map(|skill| {
            let (count, months) = totals.get(&skill_key(skill)).copied().unwrap_or((0, 0));
            SkillUsage {
                skill: skill.clone(),
                count,
                years: (months > 0).then(|| months_to_years(months)),
            }
        })
        .collect()
}

pub fn skill_statistics<'a, I>(skills: &[String], records: I, today: NaiveDate) -> SkillStatistics
where
    I: IntoIterator<Item = &'a dyn Timeline>,
{
    SkillStatistics {
        total_skills: skills.len(),
        skills_with_experience: skill_usage(skills, records, today),
        all_skills: skills.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        start: NaiveDate,
        end: Option<NaiveDate>,
        techs: Vec<String>,
    }

    impl Timeline for Record {
        fn start_date(&self) -> NaiveDate {
            self.start
        }

        fn end_date(&self) -> Option<NaiveDate> {
            self.end
        }

        fn technologies(&self) -> &[String] {
            &self.techs
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_skills_case_insensitive_and_deduped() {
        let existing = skills(&["Go"]);
        assert_eq!(missing_skills(&existing, &["go", "Rust", "rust", " ", "GO"]), vec!["Rust"]);
        assert!(missing_skills(&existing, &[] as &[&str]).is_empty());
    }

    #[test]
    fn test_retain_referenced_preserves_order() {
        let record = Record {
            start: date(2023, 1, 1),
            end: None,
            techs: skills(&["rust", "GO"]),
        };
        let referenced = referenced_keys([&record as &dyn Timeline]);
        assert_eq!(
            retain_referenced(&skills(&["Go", "Rust", "Cobol"]), &referenced),
            vec!["Go", "Rust"]
        );
    }

    #[test]
    fn test_usage_counts_records_and_years() {
        let experience = Record {
            start: date(2023, 1, 1),
            end: Some(date(2023, 7, 1)),
            techs: skills(&["Go", "go"]),
        };
        let usage = skill_usage(
            &skills(&["Go", "Cobol"]),
            [&experience as &dyn Timeline],
            date(2024, 1, 1),
        );

        assert_eq!(usage[0].count, 1);
        assert_eq!(usage[0].years, Some(0.5));
        assert_eq!(usage[1].count, 0);
        assert_eq!(usage[1].years, None);
    }
}
