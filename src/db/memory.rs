use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use crate::db::{parse_object_id, DocumentStore};
use crate::error::{StoreError, StoreResult};

/// In-memory store with the same observable behaviour as [`super::MongoStore`].
///
/// Used by the test suite and by `STORE=memory` for running the frontend
/// without a database. Nothing is persisted.
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn id_matches(document: &Document, oid: &ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(id)) if id == oid)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        // `_id` is unique per collection, as with MongoDB's E11000
        let id = document.get("_id");
        if documents.iter().any(|d| d.get("_id") == id) {
            return Err(StoreError::DuplicateId(id.map(ToString::to_string).unwrap_or_default()));
        }

        documents.push(document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let oid = parse_object_id(id)?;

        let collections = self.collections.read().await;
        let document = collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| id_matches(d, &oid)))
            .cloned();

        Ok(document)
    }

    async fn update_by_id(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()> {
        let oid = parse_object_id(id)?;

        // MongoDB refuses `{ $set: {} }`
        if fields.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| id_matches(d, &oid)));

        if let Some(document) = target {
            for (key, value) in fields {
                document.insert(key, value);
            }
        }

        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<()> {
        let oid = parse_object_id(id)?;

        let mut collections = self.collections.write().await;
        if let Some(documents) = collections.get_mut(collection) {
            if let Some(position) = documents.iter().position(|d| id_matches(d, &oid)) {
                documents.remove(position);
            }
        }

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
