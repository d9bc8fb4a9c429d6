//! Parametric repository trait.
//!
//! Every content type is persisted through the same repository contract,
//! parameterised by the record type. The record type supplies the collection
//! name and default ordering via [`Document`].

use crate::error::Result;
use crate::store::{Document, Query};
use async_trait::async_trait;

/// Typed CRUD access to one collection.
///
/// Implementations translate between `T` and the raw documents of a
/// [`crate::store::DocumentStore`], decoupling use cases from the concrete
/// database.
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// Lists records matching `query`.
    ///
    /// When the query carries no ordering, `T::default_order()` is applied.
    async fn list(&self, query: Query) -> Result<Vec<T>>;

    /// Lists every record in default order.
    async fn list_all(&self) -> Result<Vec<T>> {
        self.list(Query::new()).await
    }

    /// Finds a record by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Record found
    /// - `Ok(None)`: Record not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Creates a record with a store-generated ID.
    async fn create(&self, fields: &T::Fields) -> Result<T>;

    /// Creates a record under a well-known ID.
    async fn create_with_id(&self, id: &str, fields: &T::Fields) -> Result<T>;

    /// Overwrites the writable fields of an existing record.
    ///
    /// The store refreshes `updatedAt`; `createdAt` is left untouched.
    async fn update(&self, id: &str, fields: &T::Fields) -> Result<T>;

    /// Deletes a record (succeeds if it didn't exist).
    async fn delete(&self, id: &str) -> Result<()>;

    /// Atomically adds `delta` to a numeric counter field.
    async fn increment(&self, id: &str, field: &str, delta: i64) -> Result<()>;
}
