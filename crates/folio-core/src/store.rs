//! Document store gateway.
//!
//! The store holds schemaless JSON documents grouped into named collections.
//! It assigns identifiers and the `createdAt` / `updatedAt` timestamps on the
//! server side; typed access goes through [`crate::repository::Repository`].

use crate::error::Result;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// A JSON document as stored in a collection (always an object).
pub type RawDocument = Map<String, Value>;

/// Field carrying the document identifier.
pub const ID_FIELD: &str = "id";
/// Server-assigned creation timestamp, immutable once set.
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Server-assigned timestamp refreshed on every write.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
    /// The field is an array containing the value.
    ArrayContains,
}

/// A single `field <op> value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte,
            value: value.into(),
        }
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::ArrayContains,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering applied to query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Filters, ordering and limit for `get_all`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Gateway to the document database.
///
/// Implementations must:
/// - assign `id`, `createdAt` and `updatedAt` on create
/// - never change `createdAt` on update, and always refresh `updatedAt`
/// - merge update payloads at the top level (fields not present are kept)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document with a generated id and returns it as stored.
    async fn create(&self, collection: &str, document: RawDocument) -> Result<RawDocument>;

    /// Creates a document under a caller-chosen id (well-known singletons).
    ///
    /// Fails with a data access error if the id is already taken.
    async fn create_with_id(
        &self,
        collection: &str,
        id: &str,
        document: RawDocument,
    ) -> Result<RawDocument>;

    /// Returns the document, or `None` when it does not exist.
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<RawDocument>>;

    /// Returns all documents matching the query.
    async fn get_all(&self, collection: &str, query: &Query) -> Result<Vec<RawDocument>>;

    /// Merges `patch` into the document and returns the updated document.
    ///
    /// Fails with `NotFound` if the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: RawDocument) -> Result<RawDocument>;

    /// Deletes the document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Atomically adds `delta` to a numeric field (missing fields count as 0).
    async fn increment(&self, collection: &str, id: &str, field: &str, delta: i64) -> Result<()>;
}

/// A typed record persisted in its own collection.
///
/// Each record type splits into an identity/timestamp envelope and its
/// `Fields`, the part an editor can write. The parametric repository uses the
/// collection name and default ordering declared here.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Writable part of the record.
    type Fields: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Collection holding records of this type.
    const COLLECTION: &'static str;

    /// Human-readable entity name for errors and logs.
    const ENTITY_NAME: &'static str;

    /// Ordering applied when a query does not specify one.
    fn default_order() -> Option<OrderBy> {
        None
    }

    fn id(&self) -> &str;

    fn fields(&self) -> &Self::Fields;
}
