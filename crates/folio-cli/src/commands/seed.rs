//! Sample content for a fresh installation.

use super::context::CliContext;
use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use folio_core::content::{BlogPostFields, TestimonialFields};
use folio_core::experience::{EducationFields, ExperienceFields, Tenure};
use folio_core::lifestyle::{HobbyCategory, HobbyFields, TravelFields};
use folio_core::profile::{ProfileFields, SocialLink};
use folio_core::project::{ProjectCategory, ProjectFields, ProjectStatus};
use tokio_util::sync::CancellationToken;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub async fn run(ctx: &CliContext) -> Result<()> {
    if let Some(profile) = ctx.app.profile.get_profile().await? {
        println!(
            "{} '{}' already exists, nothing seeded",
            "Profile".dimmed(),
            profile.fields.name
        );
        return Ok(());
    }

    ctx.app
        .profile
        .save_profile(ProfileFields {
            name: "Alex Doe".to_string(),
            title: "Software Engineer".to_string(),
            bio: "I build reliable back ends and the tools around them.".to_string(),
            email: "alex@example.com".to_string(),
            location: "Berlin, Germany".to_string(),
            social_links: vec![SocialLink {
                platform: "GitHub".to_string(),
                url: "https://github.com/example".to_string(),
                icon: "github".to_string(),
            }],
            languages: labels(&["English", "German"]),
            ..Default::default()
        })
        .await?;

    ctx.app
        .experience
        .create(ExperienceFields {
            company: "Northwind".to_string(),
            position: "Senior Engineer".to_string(),
            description: "Leads the payments platform team.".to_string(),
            location: "Berlin".to_string(),
            start_date: date(2022, 3, 1),
            tenure: Tenure::Ongoing,
            achievements: labels(&["Cut settlement latency in half"]),
            technologies: labels(&["Rust", "PostgreSQL", "Kafka"]),
            ..Default::default()
        })
        .await?;
    ctx.app
        .experience
        .create(ExperienceFields {
            company: "Contoso".to_string(),
            position: "Backend Developer".to_string(),
            description: "Built internal APIs and data pipelines.".to_string(),
            location: "Hamburg".to_string(),
            start_date: date(2018, 9, 1),
            tenure: Tenure::Ended(date(2022, 2, 28)),
            technologies: labels(&["Go", "PostgreSQL", "Docker"]),
            ..Default::default()
        })
        .await?;

    ctx.app
        .education
        .create(EducationFields {
            institution: "Technical University".to_string(),
            degree: "BSc".to_string(),
            field_of_study: "Computer Science".to_string(),
            start_date: date(2014, 10, 1),
            tenure: Tenure::Ended(date(2018, 7, 31)),
            ..Default::default()
        })
        .await?;

    let cancel = CancellationToken::new();
    let mut session = ctx.app.project.open_editor(None).await?;
    ctx.app
        .project
        .save(
            &mut session,
            ProjectFields {
                title: "Folio".to_string(),
                description: "Portfolio back end with transactional galleries.".to_string(),
                short_description: "This portfolio".to_string(),
                technologies: labels(&["Rust", "Tokio"]),
                category: ProjectCategory::WebApplication,
                featured: true,
                start_date: date(2024, 1, 1),
                status: ProjectStatus::InProgress,
                ..Default::default()
            },
            &cancel,
        )
        .await?;

    let mut session = ctx.app.travel.open_editor(None).await?;
    ctx.app
        .travel
        .save(
            &mut session,
            TravelFields {
                country: "Japan".to_string(),
                city: "Kyoto".to_string(),
                title: "Temples and tea".to_string(),
                description: "Two weeks of walking between shrines.".to_string(),
                visit_date: date(2023, 4, 2),
                duration: 14,
                highlights: labels(&["Fushimi Inari at dawn"]),
                featured: true,
                ..Default::default()
            },
            &cancel,
        )
        .await?;

    ctx.app
        .hobby
        .create(HobbyFields {
            name: "Bouldering".to_string(),
            description: "Indoor climbing twice a week.".to_string(),
            category: HobbyCategory::Sports,
            started_date: Some(date(2019, 5, 1)),
            featured: true,
            ..Default::default()
        })
        .await?;

    ctx.app
        .blog
        .create(BlogPostFields {
            title: "Rolling back half-finished uploads".to_string(),
            content: "How the gallery editor keeps storage and records consistent.".to_string(),
            excerpt: "Keeping storage and records consistent.".to_string(),
            tags: labels(&["rust", "storage"]),
            category: "Engineering".to_string(),
            published: true,
            published_date: Some(date(2024, 6, 1)),
            reading_time: 6,
            ..Default::default()
        })
        .await?;

    ctx.app
        .testimonial
        .create(TestimonialFields {
            name: "Sam Lee".to_string(),
            position: "CTO".to_string(),
            company: "Northwind".to_string(),
            content: "Alex ships calm, well-tested systems.".to_string(),
            rating: 5,
            featured: true,
            ..Default::default()
        })
        .await?;

    println!("{}", "Seeded profile and sample content".green());
    Ok(())
}
