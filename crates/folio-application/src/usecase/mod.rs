//! Use cases exposed to the admin and public front ends.

pub mod admin;
pub mod blog;
pub mod contact;
pub mod education;
pub mod experience;
pub mod hobby;
pub mod profile;
pub mod project;
pub mod statistics;
pub mod testimonial;
pub mod travel;

pub use admin::{AdminClaimUseCase, AdminGate};
pub use blog::BlogUseCase;
pub use contact::ContactUseCase;
pub use education::EducationUseCase;
pub use experience::ExperienceUseCase;
pub use hobby::HobbyUseCase;
pub use profile::ProfileUseCase;
pub use project::ProjectUseCase;
pub use statistics::{PortfolioStats, StatisticsSources, StatisticsUseCase};
pub use testimonial::TestimonialUseCase;
pub use travel::TravelUseCase;
