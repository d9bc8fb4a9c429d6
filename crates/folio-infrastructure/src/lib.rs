pub mod backend;
pub mod collection_repository;
pub mod config_service;
pub mod json_dir_store;
pub mod local_object_storage;
pub mod memory_store;
pub mod outbox_email_sender;
pub mod paths;
pub mod query;
pub mod user_directory;

mod stamp;

pub use crate::collection_repository::CollectionRepository;
pub use crate::config_service::ConfigService;
pub use crate::json_dir_store::JsonDirDocumentStore;
pub use crate::local_object_storage::LocalObjectStorage;
pub use crate::memory_store::InMemoryDocumentStore;
pub use crate::outbox_email_sender::OutboxEmailSender;
pub use crate::paths::FolioPaths;
pub use crate::user_directory::{StaticAuthProvider, StoreUserDirectory};
