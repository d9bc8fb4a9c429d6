//! Project domain module.
//!
//! Projects own an image gallery whose lifecycle is managed by the
//! transactional content editor, and declare technologies that feed the
//! skill synchronization engine.

mod model;

pub use model::{Project, ProjectCategory, ProjectFields, ProjectStatus};

use crate::repository::Repository;

/// Repository for the projects collection.
pub type ProjectRepository = dyn Repository<Project>;
