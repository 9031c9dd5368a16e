use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ClientOptions,
    Client, Collection, Database,
};
use tracing::{debug, error, info};

use crate::config::{DatabaseConfig, DEFAULT_DATABASE_NAME};
use crate::db::{parse_object_id, DocumentStore};
use crate::error::{StoreError, StoreResult};

const APP_NAME: &str = "voting-app-api";

/// MongoDB-backed store. The driver `Client` inside the `Database` owns the
/// connection pool and is cheap to clone.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Builds the client from configuration and pings the server once so a
    /// bad URI fails at startup rather than on the first request.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        let database_name = resolve_database_name(config, &options);
        info!("Connecting to MongoDB database: {}", database_name);

        options.app_name = Some(APP_NAME.to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connection_timeout);
        options.server_selection_timeout = Some(config.connection_timeout);

        let client = Client::with_options(options)?;
        let store = MongoStore::new(client.database(&database_name));

        store.ping().await.map_err(|e| {
            error!("MongoDB connection test failed: {}", e);
            e
        })?;

        info!("MongoDB connection test successful");
        Ok(store)
    }

    pub fn new(database: Database) -> Self {
        MongoStore { database }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

/// Picks the database: `MONGODB_DATABASE`, then the one named in the
/// connection string (as decoded and validated by the driver), then `votingapp`.
fn resolve_database_name(config: &DatabaseConfig, options: &ClientOptions) -> String {
    config
        .database
        .clone()
        .or_else(|| options.default_database.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string())
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let cursor = self.collection(collection).find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents)
    }

    async fn insert(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        // Assign the id client-side so the returned document matches what was stored
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }

        let result = self.collection(collection).insert_one(&document).await?;
        debug!("Inserted document {} into {}", result.inserted_id, collection);

        Ok(document)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let oid = parse_object_id(id)?;

        let document = self.collection(collection).find_one(doc! { "_id": oid }).await?;
        Ok(document)
    }

    async fn update_by_id(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()> {
        let oid = parse_object_id(id)?;

        let result = self
            .collection(collection)
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await?;
        debug!(
            "Updated {} in {} (matched {}, modified {})",
            id, collection, result.matched_count, result.modified_count
        );

        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<()> {
        let oid = parse_object_id(id)?;

        let result = self.collection(collection).delete_one(doc! { "_id": oid }).await?;
        debug!("Deleted {} from {} (deleted {})", id, collection, result.deleted_count);

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
