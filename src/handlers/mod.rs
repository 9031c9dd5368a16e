// Handlers module
// HTTP handlers for the REST API

pub mod documents;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::db::DocumentStore;

/// Health check handler
/// Pings the document store; 503 when it cannot be reached
pub async fn health_check(State(store): State<Arc<dyn DocumentStore>>) -> impl IntoResponse {
    match store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
