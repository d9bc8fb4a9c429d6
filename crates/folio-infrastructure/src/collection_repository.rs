//! Parametric repository over a [`DocumentStore`].

use async_trait::async_trait;
use folio_core::error::{FolioError, Result};
use folio_core::repository::Repository;
use folio_core::store::{
    CREATED_AT_FIELD, Document, DocumentStore, ID_FIELD, Query, RawDocument, UPDATED_AT_FIELD,
};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// [`Repository`] for any [`Document`], stored in `T::COLLECTION`.
///
/// Writes send the full field set, so an unset optional field is written as
/// `null` and clears the stored value.
pub struct CollectionRepository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CollectionRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

fn decode<T: Document>(document: RawDocument) -> Result<T> {
    serde_json::from_value(Value::Object(document)).map_err(|e| FolioError::Serialization {
        format: "JSON".to_string(),
        message: format!("Invalid {} document: {}", T::ENTITY_NAME, e),
    })
}

fn encode<F: Serialize>(fields: &F) -> Result<RawDocument> {
    match serde_json::to_value(fields)? {
        Value::Object(mut map) => {
            for key in [ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD] {
                map.remove(key);
            }
            Ok(map)
        }
        other => Err(FolioError::internal(format!(
            "Record fields must serialize to an object, got {other}"
        ))),
    }
}

#[async_trait]
impl<T: Document> Repository<T> for CollectionRepository<T> {
    async fn list(&self, mut query: Query) -> Result<Vec<T>> {
        if query.order_by.is_none() {
            query.order_by = T::default_order();
        }
        self.store
            .get_all(T::COLLECTION, &query)
            .await?
            .into_iter()
            .map(decode::<T>)
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        self.store
            .get_by_id(T::COLLECTION, id)
            .await?
            .map(decode::<T>)
            .transpose()
    }

    async fn create(&self, fields: &T::Fields) -> Result<T> {
        let created = self.store.create(T::COLLECTION, encode(fields)?).await?;
        tracing::debug!("Created {} in {}", T::ENTITY_NAME, T::COLLECTION);
        decode(created)
    }

    async fn create_with_id(&self, id: &str, fields: &T::Fields) -> Result<T> {
        let created = self
            .store
            .create_with_id(T::COLLECTION, id, encode(fields)?)
            .await?;
        decode(created)
    }

    async fn update(&self, id: &str, fields: &T::Fields) -> Result<T> {
        let updated = self
            .store
            .update(T::COLLECTION, id, encode(fields)?)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    FolioError::not_found(T::ENTITY_NAME, id)
                } else {
                    e
                }
            })?;
        decode(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(T::COLLECTION, id).await
    }

    async fn increment(&self, id: &str, field: &str, delta: i64) -> Result<()> {
        self.store
            .increment(T::COLLECTION, id, field, delta)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    FolioError::not_found(T::ENTITY_NAME, id)
                } else {
                    e
                }
            })
    }
}
