//! In-memory document store.

use crate::{query, stamp};
use async_trait::async_trait;
use folio_core::clock::{Clock, SystemClock};
use folio_core::error::{FolioError, Result};
use folio_core::store::{DocumentStore, ID_FIELD, Query, RawDocument};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Volatile [`DocumentStore`] keeping collections in insertion order.
///
/// Used by tests and by the `memory` backend.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<RawDocument>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn document_id(document: &RawDocument) -> Option<&str> {
    document.get(ID_FIELD).and_then(|v| v.as_str())
}

fn position(documents: &[RawDocument], id: &str) -> Option<usize> {
    documents.iter().position(|doc| document_id(doc) == Some(id))
}

fn find_mut<'a>(
    collections: &'a mut HashMap<String, Vec<RawDocument>>,
    collection: &str,
    id: &str,
) -> Result<&'a mut RawDocument> {
    collections
        .get_mut(collection)
        .and_then(|docs| docs.iter_mut().find(|doc| document_id(doc) == Some(id)))
        .ok_or_else(|| FolioError::not_found("document", format!("{collection}/{id}")))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, collection: &str, document: RawDocument) -> Result<RawDocument> {
        let id = stamp::new_id();
        self.create_with_id(collection, &id, document).await
    }

    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        document: RawDocument,
    ) -> Result<RawDocument> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        if position(documents, id).is_some() {
            return Err(FolioError::data_access(format!(
                "Document '{collection}/{id}' already exists"
            )));
        }
        let stored = stamp::stamp_new(document, id, self.clock.now());
        documents.push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<RawDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| position(docs, id).map(|i| docs[i].clone())))
    }

    async fn get_all(&self, collection: &str, query: &Query) -> Result<Vec<RawDocument>> {
        let documents = self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default();
        Ok(query::apply(documents, query))
    }

    async fn update(&self, collection: &str, id: &str, patch: RawDocument) -> Result<RawDocument> {
        let mut collections = self.collections.write().await;
        let document = find_mut(&mut collections, collection, id)?;
        stamp::merge_patch(document, patch, self.clock.now());
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|doc| document_id(doc) != Some(id));
        }
        Ok(())
    }

    async fn increment(&self, collection: &str, id: &str, field: &str, delta: i64) -> Result<()> {
        let mut collections = self.collections.write().await;
        let document = find_mut(&mut collections, collection, id)?;
        stamp::apply_increment(document, field, delta, self.clock.now());
        Ok(())
    }
}
