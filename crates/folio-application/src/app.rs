//! Composition root wiring repositories, gateways and use cases.

use crate::editor::ProgressSink;
use crate::skill_sync::{SkillSyncDispatcher, SkillSyncQueue, SkillSyncService, SyncWarning};
use crate::usecase::{
    AdminClaimUseCase, AdminGate, BlogUseCase, ContactUseCase, EducationUseCase,
    ExperienceUseCase, HobbyUseCase, ProfileUseCase, ProjectUseCase, StatisticsSources,
    StatisticsUseCase, TestimonialUseCase, TravelUseCase,
};
use folio_core::auth::{AdminClaimService, AuthProvider};
use folio_core::clock::Clock;
use folio_core::config::RootConfig;
use folio_core::contact::EmailSender;
use folio_core::content::{BlogPost, Testimonial};
use folio_core::error::Result;
use folio_core::experience::{Education, Experience};
use folio_core::lifestyle::{Hobby, Travel};
use folio_core::profile::Profile;
use folio_core::project::Project;
use folio_core::storage::ObjectStorage;
use folio_core::store::DocumentStore;
use folio_infrastructure::CollectionRepository;
use std::sync::Arc;
use tokio::sync::mpsc;

/// External collaborators the application runs against.
#[derive(Clone)]
pub struct Gateways {
    pub store: Arc<dyn DocumentStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub email: Arc<dyn EmailSender>,
    pub auth: Arc<dyn AuthProvider>,
    pub claims: Arc<dyn AdminClaimService>,
    pub clock: Arc<dyn Clock>,
    /// Receives upload progress of project and travel gallery saves.
    pub progress: Option<ProgressSink>,
}

/// Every use case of the portfolio, sharing one store and one sync queue.
pub struct FolioApp {
    pub profile: ProfileUseCase,
    pub experience: ExperienceUseCase,
    pub education: EducationUseCase,
    pub project: ProjectUseCase,
    pub travel: TravelUseCase,
    pub hobby: HobbyUseCase,
    pub blog: BlogUseCase,
    pub testimonial: TestimonialUseCase,
    pub contact: ContactUseCase,
    pub statistics: StatisticsUseCase,
    pub admin: AdminClaimUseCase,
    pub skills: Arc<SkillSyncService>,
    sync_queue: SkillSyncQueue,
}

impl FolioApp {
    /// Wires the application and starts the skill sync worker.
    ///
    /// Must be called inside a tokio runtime. The returned receiver yields
    /// swallowed sync failures; dropping it is fine.
    pub fn build(
        gateways: Gateways,
        config: &RootConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SyncWarning>)> {
        let store = &gateways.store;
        let sources = StatisticsSources {
            profiles: Arc::new(CollectionRepository::<Profile>::new(store.clone())),
            experiences: Arc::new(CollectionRepository::<Experience>::new(store.clone())),
            education: Arc::new(CollectionRepository::<Education>::new(store.clone())),
            projects: Arc::new(CollectionRepository::<Project>::new(store.clone())),
            travels: Arc::new(CollectionRepository::<Travel>::new(store.clone())),
            hobbies: Arc::new(CollectionRepository::<Hobby>::new(store.clone())),
            blog: Arc::new(CollectionRepository::<BlogPost>::new(store.clone())),
            testimonials: Arc::new(CollectionRepository::<Testimonial>::new(store.clone())),
        };

        let skills = Arc::new(SkillSyncService::new(
            sources.profiles.clone(),
            sources.experiences.clone(),
            sources.projects.clone(),
            config.profile_id.clone(),
            gateways.clock.clone(),
        ));
        let (sync_queue, warnings) =
            SkillSyncQueue::spawn(skills.clone(), config.sync.queue_capacity);
        let dispatcher: Arc<dyn SkillSyncDispatcher> = Arc::new(sync_queue.clone());

        let gate = AdminGate::new(gateways.auth.clone());
        let max_image_bytes = config.storage.max_image_bytes;

        let mut project = ProjectUseCase::new(
            sources.projects.clone(),
            gateways.storage.clone(),
            gate.clone(),
            dispatcher.clone(),
        )
        .with_max_image_bytes(max_image_bytes);
        let mut travel = TravelUseCase::new(
            sources.travels.clone(),
            gateways.storage.clone(),
            gate.clone(),
        )
        .with_max_image_bytes(max_image_bytes);
        if let Some(sink) = gateways.progress.clone() {
            project = project.with_progress(sink.clone());
            travel = travel.with_progress(sink);
        }

        let app = Self {
            profile: ProfileUseCase::new(
                sources.profiles.clone(),
                gate.clone(),
                config.profile_id.clone(),
            ),
            experience: ExperienceUseCase::new(
                sources.experiences.clone(),
                gate.clone(),
                dispatcher,
                gateways.clock.clone(),
            ),
            education: EducationUseCase::new(sources.education.clone(), gate.clone()),
            project,
            travel,
            hobby: HobbyUseCase::new(sources.hobbies.clone(), gate.clone()),
            blog: BlogUseCase::new(sources.blog.clone(), gate.clone()),
            testimonial: TestimonialUseCase::new(sources.testimonials.clone(), gate.clone()),
            contact: ContactUseCase::new(
                gateways.email.clone(),
                config.contact.recipient.clone(),
                gateways.clock.clone(),
            )?,
            admin: AdminClaimUseCase::new(gate, gateways.claims.clone()),
            statistics: StatisticsUseCase::new(sources, config.profile_id.clone(), gateways.clock),
            skills,
            sync_queue,
        };
        tracing::info!("Folio application ready (profile '{}')", config.profile_id);
        Ok((app, warnings))
    }

    /// Waits for every skill sync job queued so far.
    pub async fn flush_sync(&self) {
        self.sync_queue.flush().await;
    }
}
