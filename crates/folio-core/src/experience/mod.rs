//! Experience and education domain module.
//!
//! Both are time-boxed records. Their end boundary is a single [`Tenure`]
//! value, so a record is either ongoing or ended at a date, never both.
//! Experience technologies feed the skill synchronization engine.

mod model;

pub use model::{Education, EducationFields, Experience, ExperienceFields, Tenure};

use crate::repository::Repository;

/// Repository for the experiences collection.
pub type ExperienceRepository = dyn Repository<Experience>;

/// Repository for the education collection.
pub type EducationRepository = dyn Repository<Education>;
