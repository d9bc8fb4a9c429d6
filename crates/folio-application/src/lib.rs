//! Application layer of the Folio portfolio service.
//!
//! Use cases orchestrate the repositories and gateways defined in
//! `folio-core`. The two stateful pieces live here as well: the skill
//! synchronization engine with its background queue, and the transactional
//! content editor used for project and travel galleries.

pub mod app;
pub mod editor;
pub mod skill_sync;
pub mod usecase;

pub use app::{FolioApp, Gateways};
pub use editor::{ContentEditor, EditSession, SaveError, SaveReport};
pub use skill_sync::{
    SkillSyncDispatcher, SkillSyncQueue, SkillSyncService, SyncOutcome, SyncWarning,
};
