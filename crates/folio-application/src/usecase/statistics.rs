//! Portfolio-wide statistics.

use folio_core::clock::Clock;
use folio_core::content::{BlogPost, Testimonial};
use folio_core::error::Result;
use folio_core::experience::{Education, Experience};
use folio_core::lifestyle::{Hobby, Travel};
use folio_core::profile::Profile;
use folio_core::project::Project;
use folio_core::repository::Repository;
use folio_core::skill::{self, SkillStatistics};
use folio_core::stats::{
    self, BlogStats, EducationStats, ExperienceStats, HobbyStats, ProjectStats, TestimonialStats,
    Timeline, TravelStats,
};
use serde::Serialize;
use std::sync::Arc;

/// Every summary the site shows, computed against one "today".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub experience: ExperienceStats,
    pub education: EducationStats,
    pub projects: ProjectStats,
    pub skills: SkillStatistics,
    pub travel: TravelStats,
    pub hobbies: HobbyStats,
    pub blog: BlogStats,
    pub testimonials: TestimonialStats,
}

/// Read-only handles to every collection.
#[derive(Clone)]
pub struct StatisticsSources {
    pub profiles: Arc<dyn Repository<Profile>>,
    pub experiences: Arc<dyn Repository<Experience>>,
    pub education: Arc<dyn Repository<Education>>,
    pub projects: Arc<dyn Repository<Project>>,
    pub travels: Arc<dyn Repository<Travel>>,
    pub hobbies: Arc<dyn Repository<Hobby>>,
    pub blog: Arc<dyn Repository<BlogPost>>,
    pub testimonials: Arc<dyn Repository<Testimonial>>,
}

pub struct StatisticsUseCase {
    sources: StatisticsSources,
    profile_id: String,
    clock: Arc<dyn Clock>,
}

impl StatisticsUseCase {
    pub fn new(
        sources: StatisticsSources,
        profile_id: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sources,
            profile_id: profile_id.into(),
            clock,
        }
    }

    /// Loads every collection concurrently and aggregates it.
    pub async fn portfolio_stats(&self) -> Result<PortfolioStats> {
        let s = &self.sources;
        let (profile, experiences, education, projects, travels, hobbies, posts, testimonials) =
            futures::try_join!(
                s.profiles.find_by_id(&self.profile_id),
                s.experiences.list_all(),
                s.education.list_all(),
                s.projects.list_all(),
                s.travels.list_all(),
                s.hobbies.list_all(),
                s.blog.list_all(),
                s.testimonials.list_all(),
            )?;

        let today = self.clock.today();
        let skills = profile.map(|p| p.fields.skills).unwrap_or_default();
        let timelines = experiences
            .iter()
            .map(|e| e as &dyn Timeline)
            .chain(projects.iter().map(|p| p as &dyn Timeline));

        Ok(PortfolioStats {
            experience: stats::experience_stats(&experiences, today),
            education: stats::education_stats(&education),
            projects: stats::project_stats(&projects),
            skills: skill::skill_statistics(&skills, timelines, today),
            travel: stats::travel_stats(&travels),
            hobbies: stats::hobby_stats(&hobbies),
            blog: stats::blog_stats(&posts),
            testimonials: stats::testimonial_stats(&testimonials),
        })
    }
}
