//! Document storage.
//!
//! Handlers talk to a [`DocumentStore`] trait object so the same routes run
//! against MongoDB in production and against [`MemoryStore`] in tests.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::error::{StoreError, StoreResult};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Schemaless CRUD over named collections.
///
/// Every method performs a single round trip to the backing store. Lookups
/// by id take the raw path segment and parse it with [`parse_object_id`], so
/// a malformed id is reported as a store failure like any other.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in the collection, in insertion order.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Inserts the document, assigning an `_id` when it has none, and returns
    /// the stored document.
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<Document>;

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Applies `fields` as a `$set` on the matching document. Succeeds when
    /// nothing matches.
    async fn update_by_id(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()>;

    /// Succeeds when nothing matches.
    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Parses a path segment as a MongoDB ObjectId.
pub fn parse_object_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
