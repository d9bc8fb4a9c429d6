//! Lifestyle domain module: travels and hobbies.
//!
//! Travels own an image gallery edited through the transactional content
//! editor; hobbies are plain content records.

mod model;

pub use model::{Coordinates, Hobby, HobbyCategory, HobbyFields, Travel, TravelFields};

use crate::repository::Repository;

/// Repository for the travels collection.
pub type TravelRepository = dyn Repository<Travel>;

/// Repository for the hobbies collection.
pub type HobbyRepository = dyn Repository<Hobby>;
