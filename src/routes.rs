use axum::{routing::get, Router};
use std::{path::Path, sync::Arc};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::{
    config::AppConfig,
    db::DocumentStore,
    handlers::{
        documents::{
            create_document, delete_document, get_document, list_documents, update_document,
            CollectionState,
        },
        health_check,
    },
    middleware::create_middleware_stack,
    models::{collection, Collection},
};

/// CRUD routes for a single collection, bound to the given store.
pub fn collection_router(store: Arc<dyn DocumentStore>, collection: Collection) -> Router {
    Router::new()
        .route(
            &collection.base_path(),
            get(list_documents).post(create_document),
        )
        .route(
            &collection.item_path(),
            get(get_document).put(update_document).delete(delete_document),
        )
        .with_state(CollectionState { store, collection })
}

/// Builds the whole application: both collection APIs, the health check, the
/// SPA build directory as fallback, and the middleware stack.
pub fn create_app(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .with_state(store.clone());

    for collection in collection::ALL {
        info!("Mounting {} routes at {}", collection.name, collection.base_path());
        app = app.merge(collection_router(store.clone(), collection));
    }

    app.fallback_service(static_files(&config.static_dir))
        .layer(create_middleware_stack(config.request_timeout))
}

/// Serves the frontend build. Unknown paths get `index.html` so client-side
/// routes survive a reload.
fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
