//! Skill synchronization engine and its background queue.

mod queue;
mod service;

pub use queue::{SkillSyncDispatcher, SkillSyncQueue};
pub use service::{SkillSyncService, SyncOperation, SyncOutcome, SyncWarning};
