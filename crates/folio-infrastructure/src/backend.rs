//! Builds the configured gateways.

use crate::config_service::ConfigService;
use crate::json_dir_store::JsonDirDocumentStore;
use crate::local_object_storage::LocalObjectStorage;
use crate::memory_store::InMemoryDocumentStore;
use crate::outbox_email_sender::OutboxEmailSender;
use folio_core::clock::Clock;
use folio_core::config::{RootConfig, StoreBackend};
use folio_core::error::Result;
use folio_core::store::DocumentStore;
use std::sync::Arc;

pub async fn open_document_store(
    service: &ConfigService,
    config: &RootConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn DocumentStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Ok(Arc::new(InMemoryDocumentStore::with_clock(clock)))
        }
        StoreBackend::JsonDir => {
            let dir = service.documents_dir(config)?;
            tracing::debug!("Opening document store at {}", dir.display());
            Ok(Arc::new(JsonDirDocumentStore::with_clock(dir, clock).await?))
        }
    }
}

pub fn open_object_storage(
    service: &ConfigService,
    config: &RootConfig,
) -> Result<LocalObjectStorage> {
    Ok(LocalObjectStorage::new(
        service.objects_dir(config)?,
        config.storage.public_base_url.clone(),
    ))
}

pub fn open_email_sender(
    service: &ConfigService,
    config: &RootConfig,
) -> Result<OutboxEmailSender> {
    Ok(OutboxEmailSender::new(service.outbox_dir(config)?))
}
