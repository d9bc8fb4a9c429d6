//! Domain layer of the Folio portfolio service.
//!
//! Holds the content models, the repository and gateway traits implemented by
//! `folio-infrastructure`, and the pure skill reconciliation and statistics
//! used by `folio-application`.

pub mod auth;
pub mod clock;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod experience;
pub mod image;
pub mod lifestyle;
pub mod profile;
pub mod project;
pub mod repository;
pub mod skill;
pub mod stats;
pub mod storage;
pub mod store;
pub mod validation;

// Re-export common error type
pub use error::{FolioError, Result};
