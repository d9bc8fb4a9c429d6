//! Profile domain module.
//!
//! The profile is a singleton record located by a well-known id. Besides the
//! admin profile editor, its `skills` list is written by the skill
//! synchronization engine.

mod model;

pub use model::{DEFAULT_PROFILE_ID, Profile, ProfileFields, SocialLink};

use crate::repository::Repository;

/// Repository for the profile collection.
pub type ProfileRepository = dyn Repository<Profile>;
