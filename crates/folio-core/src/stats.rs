//! Statistics over loaded collections.
//!
//! Everything here is a pure function of its inputs and an explicit
//! `today`, so results are deterministic in tests.

use crate::content::{BlogPost, Testimonial};
use crate::experience::{Education, Experience};
use crate::lifestyle::{Hobby, Travel};
use crate::project::Project;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Whole calendar months from `start` to `end`, ignoring the day of month.
///
/// Negative spans count as zero.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months.max(0) as u32
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn months_to_years(months: u32) -> f64 {
    round_one_decimal(f64::from(months) / 12.0)
}

/// A dated record that references technologies.
pub trait Timeline {
    fn start_date(&self) -> NaiveDate;

    /// End of the record, `None` while it is still running.
    fn end_date(&self) -> Option<NaiveDate>;

    fn technologies(&self) -> &[String];

    /// Month span, measured up to `today` for running records.
    fn span_months(&self, today: NaiveDate) -> u32 {
        months_between(self.start_date(), self.end_date().unwrap_or(today))
    }
}

impl Timeline for Experience {
    fn start_date(&self) -> NaiveDate {
        self.fields.start_date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.fields.tenure.end_date()
    }

    fn technologies(&self) -> &[String] {
        &self.fields.technologies
    }
}

impl Timeline for Project {
    fn start_date(&self) -> NaiveDate {
        self.fields.start_date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.fields.end_date
    }

    fn technologies(&self) -> &[String] {
        &self.fields.technologies
    }
}

/// A label with its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Counts labels, keeping them in first-encounter order.
pub fn histogram<I, S>(labels: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        match index.get(label) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label.to_string(), counts.len());
                counts.push(LabelCount::new(label, 1));
            }
        }
    }
    counts
}

/// The `n` most frequent labels; ties keep first-encounter order.
pub fn top_n(mut counts: Vec<LabelCount>, n: usize) -> Vec<LabelCount> {
    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    pub total_experience: usize,
    pub total_companies: usize,
    pub total_skills: usize,
    pub years_of_experience: f64,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
}

pub fn experience_stats(experiences: &[Experience], today: NaiveDate) -> ExperienceStats {
    let current = experiences.iter().find(|e| e.fields.tenure.is_ongoing());
    let total_months: u32 = experiences.iter().map(|e| e.span_months(today)).sum();
    let skills: HashSet<&str> = experiences
        .iter()
        .flat_map(|e| e.fields.technologies.iter().map(String::as_str))
        .collect();

    ExperienceStats {
        total_experience: experiences.len(),
        total_companies: distinct(experiences.iter().map(|e| e.fields.company.as_str())).len(),
        total_skills: skills.len(),
        years_of_experience: months_to_years(total_months),
        current_position: current.map(|e| e.fields.position.clone()),
        current_company: current.map(|e| e.fields.company.clone()),
    }
}

/// Per-technology experience, as shown on the public experience page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyExperience {
    pub skill: String,
    pub count: usize,
    pub years: f64,
}

/// Aggregates experience technologies, most years first.
pub fn technology_experience(
    experiences: &[Experience],
    today: NaiveDate,
) -> Vec<TechnologyExperience> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (usize, u32)> = HashMap::new();
    for experience in experiences {
        let months = experience.span_months(today);
        for tech in distinct(experience.technologies().iter().map(String::as_str)) {
            let entry = totals.entry(tech.clone()).or_insert_with(|| {
                order.push(tech.clone());
                (0, 0)
            });
            entry.0 += 1;
            entry.1 += months;
        }
    }

    let mut result: Vec<TechnologyExperience> = order
        .into_iter()
        .map(|skill| {
            let (count, months) = totals[&skill];
            TechnologyExperience {
                skill,
                count,
                years: months_to_years(months),
            }
        })
        .collect();
    result.sort_by(|a, b| b.years.total_cmp(&a.years));
    result
}

/// Sorted distinct technologies across experiences.
pub fn all_technologies(experiences: &[Experience]) -> Vec<String> {
    let mut all = distinct(
        experiences
            .iter()
            .flat_map(|e| e.fields.technologies.iter().map(String::as_str)),
    );
    all.sort();
    all
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationStats {
    pub total_education: usize,
    pub total_institutions: usize,
    pub degrees: Vec<LabelCount>,
    pub institutions: Vec<LabelCount>,
    pub fields: Vec<LabelCount>,
}

pub fn education_stats(education: &[Education]) -> EducationStats {
    let institutions = histogram(education.iter().map(|e| &e.fields.institution));
    EducationStats {
        total_education: education.len(),
        total_institutions: institutions.len(),
        degrees: histogram(education.iter().map(|e| &e.fields.degree)),
        institutions,
        fields: histogram(education.iter().map(|e| &e.fields.field_of_study)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: usize,
    pub featured_count: usize,
    pub categories: Vec<LabelCount>,
    pub statuses: Vec<LabelCount>,
    pub top_technologies: Vec<LabelCount>,
}

pub fn project_stats(projects: &[Project]) -> ProjectStats {
    ProjectStats {
        total_projects: projects.len(),
        featured_count: projects.iter().filter(|p| p.fields.featured).count(),
        categories: histogram(projects.iter().map(|p| p.fields.category.to_string())),
        statuses: histogram(projects.iter().map(|p| p.fields.status.to_string())),
        top_technologies: top_n(
            histogram(projects.iter().flat_map(|p| p.fields.technologies.iter())),
            10,
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelStats {
    pub total_travels: usize,
    pub total_countries: usize,
    pub total_cities: usize,
    pub total_days: u32,
    pub countries_visited: Vec<String>,
    /// `"{city}, {country}"` entries.
    pub cities_visited: Vec<String>,
    pub average_trip_duration: f64,
}

pub fn travel_stats(travels: &[Travel]) -> TravelStats {
    let countries = distinct(travels.iter().map(|t| t.fields.country.as_str()));
    let city_labels: Vec<String> = travels
        .iter()
        .map(|t| format!("{}, {}", t.fields.city, t.fields.country))
        .collect();
    let cities = distinct(city_labels.iter().map(String::as_str));
    let total_days: u32 = travels.iter().map(|t| t.fields.duration).sum();
    let average = if travels.is_empty() {
        0.0
    } else {
        round_one_decimal(f64::from(total_days) / travels.len() as f64)
    };

    TravelStats {
        total_travels: travels.len(),
        total_countries: countries.len(),
        total_cities: cities.len(),
        total_days,
        countries_visited: countries,
        cities_visited: cities,
        average_trip_duration: average,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HobbyStats {
    pub total_hobbies: usize,
    pub featured_count: usize,
    pub total_achievements: usize,
    pub categories: Vec<LabelCount>,
    pub oldest_hobby: Option<String>,
    pub newest_hobby: Option<String>,
}

pub fn hobby_stats(hobbies: &[Hobby]) -> HobbyStats {
    let mut dated: Vec<(&NaiveDate, &str)> = hobbies
        .iter()
        .filter_map(|h| h.fields.started_date.as_ref().map(|d| (d, h.fields.name.as_str())))
        .collect();
    dated.sort_by_key(|(date, _)| **date);

    HobbyStats {
        total_hobbies: hobbies.len(),
        featured_count: hobbies.iter().filter(|h| h.fields.featured).count(),
        total_achievements: hobbies.iter().map(|h| h.fields.achievements.len()).sum(),
        categories: histogram(hobbies.iter().map(|h| h.fields.category.to_string())),
        oldest_hobby: dated.first().map(|(_, name)| name.to_string()),
        newest_hobby: dated.last().map(|(_, name)| name.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub categories: Vec<LabelCount>,
    pub popular_tags: Vec<LabelCount>,
}

pub fn blog_stats(posts: &[BlogPost]) -> BlogStats {
    let published = posts.iter().filter(|p| p.fields.published).count();
    BlogStats {
        total_posts: posts.len(),
        published_posts: published,
        draft_posts: posts.len() - published,
        total_views: posts.iter().map(|p| p.fields.views).sum(),
        total_likes: posts.iter().map(|p| p.fields.likes).sum(),
        categories: histogram(posts.iter().map(|p| &p.fields.category)),
        popular_tags: top_n(histogram(posts.iter().flat_map(|p| p.fields.tags.iter())), 10),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialStats {
    pub total_testimonials: usize,
    pub featured_count: usize,
    pub average_rating: f64,
    pub rating_distribution: BTreeMap<u8, usize>,
    pub top_companies: Vec<String>,
}

pub fn testimonial_stats(testimonials: &[Testimonial]) -> TestimonialStats {
    let mut distribution = BTreeMap::new();
    for t in testimonials {
        *distribution.entry(t.fields.rating).or_insert(0) += 1;
    }
    let total: u32 = testimonials.iter().map(|t| u32::from(t.fields.rating)).sum();
    let average = if testimonials.is_empty() {
        0.0
    } else {
        round_one_decimal(f64::from(total) / testimonials.len() as f64)
    };

    TestimonialStats {
        total_testimonials: testimonials.len(),
        featured_count: testimonials.iter().filter(|t| t.fields.featured).count(),
        average_rating: average,
        rating_distribution: distribution,
        top_companies: top_n(histogram(testimonials.iter().map(|t| &t.fields.company)), 5)
            .into_iter()
            .map(|c| c.label)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::{ExperienceFields, Tenure};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn experience(company: &str, start: NaiveDate, tenure: Tenure, techs: &[&str]) -> Experience {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Experience {
            id: company.to_lowercase(),
            fields: ExperienceFields {
                company: company.to_string(),
                position: "Engineer".to_string(),
                description: "Built things for customers".to_string(),
                start_date: start,
                tenure,
                technologies: techs.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_months_between_uses_calendar_months() {
        assert_eq!(months_between(date(2023, 1, 1), date(2023, 7, 1)), 6);
        assert_eq!(months_between(date(2023, 1, 31), date(2023, 2, 1)), 1);
        assert_eq!(months_between(date(2023, 5, 1), date(2023, 1, 1)), 0);
        assert_eq!(months_to_years(6), 0.5);
    }

    #[test]
    fn test_top_n_keeps_first_encounter_on_ties() {
        let counts = histogram(["b", "a", "c", "a", "b", "d"]);
        let top = top_n(counts, 3);
        assert_eq!(
            top,
            vec![
                LabelCount::new("b", 2),
                LabelCount::new("a", 2),
                LabelCount::new("c", 1),
            ]
        );
    }

    #[test]
    fn test_experience_stats_measures_ongoing_until_today() {
        let today = date(2024, 1, 1);
        let experiences = vec![
            experience("Acme", date(2023, 1, 1), Tenure::Ongoing, &["Rust", "Go"]),
            experience("Acme", date(2021, 1, 1), Tenure::Ended(date(2022, 1, 1)), &["Go"]),
        ];

        let stats = experience_stats(&experiences, today);
        assert_eq!(stats.total_experience, 2);
        assert_eq!(stats.total_companies, 1);
        assert_eq!(stats.total_skills, 2);
        assert_eq!(stats.years_of_experience, 2.0);
        assert_eq!(stats.current_company.as_deref(), Some("Acme"));

        let techs = technology_experience(&experiences, today);
        assert_eq!(techs[0].skill, "Go");
        assert_eq!(techs[0].count, 2);
        assert_eq!(techs[0].years, 2.0);
        assert_eq!(all_technologies(&experiences), vec!["Go", "Rust"]);
    }
}
