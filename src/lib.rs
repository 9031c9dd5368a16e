// Library root for the voting app API

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use db::{DocumentStore, MemoryStore, MongoStore};
pub use error::{ApiError, StoreError};
pub use models::{Collection, TERRITORIES, VOTES};
pub use routes::{collection_router, create_app};
