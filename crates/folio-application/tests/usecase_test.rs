mod common;

use common::{CallLog, FakeStorage, admin_auth, clock, date, memory_store, png, visitor_auth};
use folio_application::{FolioApp, Gateways, SaveError};
use folio_core::auth::AuthProvider;
use folio_core::config::RootConfig;
use folio_core::contact::ContactForm;
use folio_core::content::{BlogPostFields, TestimonialFields};
use folio_core::experience::{ExperienceFields, Tenure};
use folio_core::lifestyle::TravelFields;
use folio_core::profile::ProfileFields;
use folio_core::project::{ProjectFields, ProjectStatus};
use folio_core::storage::ObjectStorage;
use folio_core::store::DocumentStore;
use folio_infrastructure::{LocalObjectStorage, OutboxEmailSender, StoreUserDirectory};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

struct Harness {
    app: FolioApp,
    store: Arc<dyn DocumentStore>,
    directory: Arc<StoreUserDirectory>,
    temp_dir: TempDir,
}

fn harness(auth: Arc<dyn AuthProvider>) -> Harness {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(LocalObjectStorage::new(
        temp_dir.path().join("objects"),
        "http://localhost/objects",
    ));
    harness_with_storage(temp_dir, auth, storage)
}

fn harness_with_storage(
    temp_dir: TempDir,
    auth: Arc<dyn AuthProvider>,
    storage: Arc<dyn ObjectStorage>,
) -> Harness {
    let store = memory_store();
    let directory = Arc::new(StoreUserDirectory::new(store.clone()));
    let gateways = Gateways {
        store: store.clone(),
        storage,
        email: Arc::new(OutboxEmailSender::new(temp_dir.path().join("outbox"))),
        auth,
        claims: directory.clone(),
        clock: clock(),
        progress: None,
    };
    let (app, _warnings) = FolioApp::build(gateways, &RootConfig::default()).unwrap();
    Harness {
        app,
        store,
        directory,
        temp_dir,
    }
}

fn profile(skills: &[&str]) -> ProfileFields {
    ProfileFields {
        name: "Ada Lovelace".to_string(),
        title: "Engineer".to_string(),
        bio: "Writes programs".to_string(),
        email: "ada@example.com".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn experience(technologies: &[&str]) -> ExperienceFields {
    ExperienceFields {
        company: "Acme".to_string(),
        position: "Engineer".to_string(),
        description: "Built the platform team".to_string(),
        start_date: date(2023, 1, 1),
        tenure: Tenure::Ended(date(2023, 7, 1)),
        technologies: technologies.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn project(technologies: &[&str]) -> ProjectFields {
    ProjectFields {
        title: "Demo".to_string(),
        description: "A demo project".to_string(),
        short_description: "Demo".to_string(),
        technologies: technologies.iter().map(|s| s.to_string()).collect(),
        start_date: date(2024, 1, 1),
        status: ProjectStatus::Completed,
        featured: true,
        ..Default::default()
    }
}

fn travel() -> TravelFields {
    TravelFields {
        country: "Japan".to_string(),
        city: "Kyoto".to_string(),
        title: "Temples".to_string(),
        description: "Two weeks of temples and tea".to_string(),
        visit_date: date(2024, 4, 1),
        duration: 14,
        highlights: vec!["Fushimi Inari".to_string()],
        ..Default::default()
    }
}

fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

async fn skills(h: &Harness) -> Vec<String> {
    h.app.profile.get_profile().await.unwrap().unwrap().fields.skills
}

#[tokio::test]
async fn test_profile_save_dedupes_skills_and_upserts() {
    let h = harness(admin_auth());

    let created = h.app.profile.save_profile(profile(&["Go", "go", "Rust"])).await.unwrap();
    assert_eq!(created.id, "main-profile");
    assert_eq!(created.fields.skills, vec!["Go", "Rust"]);

    let updated = h.app.profile.save_profile(profile(&["Zig"])).await.unwrap();
    assert_eq!(updated.fields.skills, vec!["Zig"]);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_experience_mutations_drive_skill_sync() {
    let h = harness(admin_auth());
    h.app.profile.save_profile(profile(&["Go"])).await.unwrap();

    let created = h.app.experience.create(experience(&["Go", "Rust"])).await.unwrap();
    h.app.flush_sync().await;
    assert_eq!(skills(&h).await, vec!["Go", "Rust"]);

    h.app
        .experience
        .update(&created.id, experience(&["Go"]))
        .await
        .unwrap();
    h.app.flush_sync().await;
    assert_eq!(skills(&h).await, vec!["Go"]);

    h.app.experience.delete(&created.id).await.unwrap();
    h.app.flush_sync().await;
    assert!(skills(&h).await.is_empty());
}

#[tokio::test]
async fn test_admin_operations_require_admin_claim() {
    let h = harness(visitor_auth());

    let err = h.app.experience.create(experience(&["Go"])).await.unwrap_err();
    assert!(err.is_security());
    assert!(h.app.experience.list().await.unwrap().is_empty());

    let mut session = h.app.project.open_editor(None).await.unwrap();
    let err = h
        .app
        .project
        .save(&mut session, project(&[]), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Forbidden(_)));
}

#[tokio::test]
async fn test_project_gallery_roundtrip_and_delete() {
    let h = harness(admin_auth());
    h.app.profile.save_profile(profile(&[])).await.unwrap();

    let mut session = h.app.project.open_editor(None).await.unwrap();
    session.stage_file(png("shot.png")).unwrap();
    let report = h
        .app
        .project
        .save(&mut session, project(&["Rust"]), &CancellationToken::new())
        .await
        .unwrap();
    h.app.flush_sync().await;
    assert_eq!(skills(&h).await, vec!["Rust"]);

    let id = report.record.id.clone();
    let image_dir = h.temp_dir.path().join("objects/projects").join(&id).join("images");
    assert_eq!(std::fs::read_dir(&image_dir).unwrap().count(), 1);
    assert_eq!(h.app.project.featured().await.unwrap().len(), 1);

    let warnings = h.app.project.delete(&id).await.unwrap();
    h.app.flush_sync().await;
    assert!(warnings.is_empty());
    assert_eq!(std::fs::read_dir(&image_dir).unwrap().count(), 0);
    assert!(h.app.project.get(&id).await.unwrap().is_none());
    assert!(skills(&h).await.is_empty());
}

#[tokio::test]
async fn test_failed_upload_still_syncs_skills_of_created_project() {
    let storage = Arc::new(FakeStorage::new(CallLog::default()));
    storage.fail_upload_of("b.png");
    let h = harness_with_storage(TempDir::new().unwrap(), admin_auth(), storage.clone());
    h.app.profile.save_profile(profile(&["Go"])).await.unwrap();

    let mut session = h.app.project.open_editor(None).await.unwrap();
    session.stage_file(png("a.png")).unwrap();
    session.stage_file(png("b.png")).unwrap();
    let err = h
        .app
        .project
        .save(&mut session, project(&["Rust"]), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::UploadFailed { ref file_name, .. } if file_name == "b.png"));
    h.app.flush_sync().await;

    let projects = h.app.project.list().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert!(projects[0].fields.images.is_empty());
    assert_eq!(storage.object_count(), 0);
    assert_eq!(skills(&h).await, vec!["Go", "Rust"]);

    // cancelled before the record exists: nothing written, nothing synced
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut session = h.app.project.open_editor(None).await.unwrap();
    let err = h
        .app
        .project
        .save(&mut session, project(&["Zig"]), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Cancelled));
    h.app.flush_sync().await;
    assert_eq!(h.app.project.list().await.unwrap().len(), 1);
    assert_eq!(skills(&h).await, vec!["Go", "Rust"]);
}

#[tokio::test]
async fn test_travel_gallery_roundtrip_and_delete() {
    let h = harness(admin_auth());

    let mut session = h.app.travel.open_editor(None).await.unwrap();
    let invalid = TravelFields {
        duration: 0,
        ..travel()
    };
    let err = h
        .app
        .travel
        .save(&mut session, invalid, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::ValidationFailed(_)));
    assert!(h.app.travel.list().await.unwrap().is_empty());

    session.stage_file(png("temple.png")).unwrap();
    session.stage_file(png("garden.png")).unwrap();
    let report = h
        .app
        .travel
        .save(&mut session, travel(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(report.created);
    let id = report.record.id.clone();
    let images = report.record.fields.images.clone();
    assert_eq!(images.len(), 2);
    let prefix = format!("http://localhost/objects/travels/{id}/images/travel-");
    assert!(images.iter().all(|url| url.starts_with(&prefix)));

    let image_dir = h.temp_dir.path().join("objects/travels").join(&id).join("images");
    let names = file_names(&image_dir);
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|name| name.starts_with("travel-")));

    let mut session = h.app.travel.open_editor(Some(&id)).await.unwrap();
    assert!(session.remove_image(0));
    let report = h
        .app
        .travel
        .save(&mut session, travel(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(!report.created);
    assert!(report.cleanup_warnings.is_empty());
    assert_eq!(report.record.fields.images, vec![images[1].clone()]);
    let kept = images[1].rsplit('/').next().unwrap().to_string();
    assert_eq!(file_names(&image_dir), vec![kept]);

    let warnings = h.app.travel.delete(&id).await.unwrap();
    assert!(warnings.is_empty());
    assert!(file_names(&image_dir).is_empty());
    assert!(h.app.travel.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_blog_lookups_only_see_published_posts() {
    let h = harness(admin_auth());
    let post = |title: &str, category: &str, tags: &[&str], published: bool| BlogPostFields {
        title: title.to_string(),
        content: format!("All about {title}"),
        excerpt: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category: category.to_string(),
        published,
        ..Default::default()
    };
    let rust = h
        .app
        .blog
        .create(post("Ownership", "Rust", &["memory", "Borrowing"], true))
        .await
        .unwrap();
    h.app
        .blog
        .create(post("Draft lifetimes", "Rust", &["memory"], false))
        .await
        .unwrap();

    assert_eq!(h.app.blog.by_category("rust").await.unwrap().len(), 1);
    assert_eq!(h.app.blog.by_tag("borrowing").await.unwrap().len(), 1);
    assert_eq!(h.app.blog.search("LIFETIMES").await.unwrap().len(), 0);
    assert_eq!(h.app.blog.search("ownership").await.unwrap()[0].id, rust.id);

    h.app.blog.increment_views(&rust.id).await.unwrap();
    h.app.blog.increment_views(&rust.id).await.unwrap();
    h.app.blog.increment_likes(&rust.id).await.unwrap();
    let stats = h.app.blog.stats().await.unwrap();
    assert_eq!((stats.total_posts, stats.published_posts, stats.draft_posts), (2, 1, 1));
    assert_eq!((stats.total_views, stats.total_likes), (2, 1));
    assert_eq!(stats.popular_tags[0].label, "memory");
}

#[tokio::test]
async fn test_testimonials_by_min_rating() {
    let h = harness(admin_auth());
    for (name, rating) in [("A", 5u8), ("B", 3), ("C", 4)] {
        h.app
            .testimonial
            .create(TestimonialFields {
                name: name.to_string(),
                position: "CTO".to_string(),
                company: "Acme".to_string(),
                content: "Great work".to_string(),
                rating,
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let high = h.app.testimonial.by_min_rating(4).await.unwrap();
    assert_eq!(high.len(), 2);
    let stats = h.app.testimonial.stats().await.unwrap();
    assert_eq!(stats.average_rating, 4.0);
    assert_eq!(stats.top_companies, vec!["Acme"]);
}

#[tokio::test]
async fn test_portfolio_statistics() {
    let h = harness(admin_auth());
    h.app.profile.save_profile(profile(&["Go", "Haskell"])).await.unwrap();
    h.app.experience.create(experience(&["Go"])).await.unwrap();
    h.app.flush_sync().await;

    let stats = h.app.statistics.portfolio_stats().await.unwrap();
    assert_eq!(stats.experience.total_experience, 1);
    assert_eq!(stats.skills.total_skills, 2);
    assert_eq!(stats.skills.skills_with_experience[0].count, 1);
    assert_eq!(stats.skills.skills_with_experience[0].years, Some(0.5));
    assert_eq!(stats.skills.skills_with_experience[1].count, 0);
    assert_eq!(stats.travel.total_travels, 0);
}

#[tokio::test]
async fn test_contact_submission_lands_in_outbox() {
    let h = harness(visitor_auth());
    let form = ContactForm {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        subject: "Compiler talk".to_string(),
        message: "Would you speak at our meetup?".to_string(),
        phone: Some("+1 (555) 010-9999".to_string()),
        company: None,
    };

    let submission = h.app.contact.submit(form).await.unwrap();

    let outbox: Vec<_> = std::fs::read_dir(h.temp_dir.path().join("outbox"))
        .unwrap()
        .collect();
    assert_eq!(outbox.len(), 1);
    let message = std::fs::read_to_string(outbox[0].as_ref().unwrap().path()).unwrap();
    assert!(message.contains("Subject: [Portfolio Contact] Compiler talk"));
    assert!(message.contains(&submission.id));
}

#[tokio::test]
async fn test_admin_claims_bootstrap() {
    let h = harness(visitor_auth());
    h.directory.register("visitor-1", Some("v@example.com")).await.unwrap();

    let update = h
        .app
        .admin
        .set_admin_claim_by_email_or_uid(None, Some("v@example.com"), None)
        .await
        .unwrap();
    assert!(update.admin);
    assert_eq!(update.uid, "visitor-1");

    let users = h.app.admin.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].custom_claims.admin);
    assert!(h.store.get_by_id("users", "visitor-1").await.unwrap().is_some());
}
