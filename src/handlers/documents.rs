// Document handlers
// One generic set of CRUD handlers, mounted once per collection

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    db::DocumentStore,
    error::{ApiError, ApiResult},
    extractors::DocumentBody,
    models::{
        collection::MISSING_NAME_MESSAGE,
        document::{has_name, strip_id, ID_FIELD},
        document_to_json, json_to_document, Collection,
    },
};

/// Router state for one collection: the shared store plus which collection
/// the handlers operate on.
#[derive(Clone)]
pub struct CollectionState {
    pub store: Arc<dyn DocumentStore>,
    pub collection: Collection,
}

/// List all documents
/// GET /api/<collection>
pub async fn list_documents(State(state): State<CollectionState>) -> ApiResult<impl IntoResponse> {
    let collection = state.collection;
    info!("Fetching all {}", collection.name);

    let documents = state
        .store
        .list(collection.name)
        .await
        .map_err(|e| ApiError::operation_failed(collection.list_failed(), e))?;

    info!("Retrieved {} {}", documents.len(), collection.name);
    let documents: Vec<Value> = documents.into_iter().map(document_to_json).collect();
    Ok((StatusCode::OK, Json(documents)))
}

/// Create a document
/// POST /api/<collection>
/// A body that is missing, not JSON, or not an object counts as having no name.
pub async fn create_document(
    State(state): State<CollectionState>,
    body: Result<DocumentBody, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let collection = state.collection;

    let body = match body {
        Ok(DocumentBody(body)) if has_name(&body) => body,
        Ok(_) => return Err(ApiError::validation(MISSING_NAME_MESSAGE)),
        Err(rejection) => {
            debug!("Unreadable {} body: {}", collection.singular, rejection);
            return Err(ApiError::validation(MISSING_NAME_MESSAGE));
        }
    };

    info!("Creating new {}", collection.singular);

    let document = json_to_document(&body)
        .map_err(|e| ApiError::operation_failed(collection.create_failed(), e))?;

    let stored = state
        .store
        .insert(collection.name, document)
        .await
        .map_err(|e| ApiError::operation_failed(collection.create_failed(), e))?;

    let created = document_to_json(stored);
    info!("Successfully created {} with id: {}", collection.singular, created[ID_FIELD]);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a document by id, or `null` when none matches
/// GET /api/<collection>/:id
pub async fn get_document(
    State(state): State<CollectionState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let collection = state.collection;
    info!("Fetching {} with id: {}", collection.singular, id);

    let document = state
        .store
        .find_by_id(collection.name, &id)
        .await
        .map_err(|e| ApiError::operation_failed(collection.get_failed(), e))?;

    Ok((StatusCode::OK, Json(document.map(document_to_json))))
}

/// Merge the submitted fields into a document and echo them back with the id.
/// Responds the same whether or not a document matched.
/// PUT /api/<collection>/:id
pub async fn update_document(
    State(state): State<CollectionState>,
    Path(id): Path<String>,
    DocumentBody(mut body): DocumentBody,
) -> ApiResult<impl IntoResponse> {
    let collection = state.collection;
    info!("Updating {} with id: {}", collection.singular, id);

    strip_id(&mut body);
    debug!("Update fields for {} {}: {:?}", collection.singular, id, body);

    let fields = json_to_document(&body)
        .map_err(|e| ApiError::operation_failed(collection.update_failed(), e))?;

    state
        .store
        .update_by_id(collection.name, &id, fields)
        .await
        .map_err(|e| ApiError::operation_failed(collection.update_failed(), e))?;

    body.insert(ID_FIELD.to_string(), Value::String(id));
    Ok((StatusCode::OK, Json(Value::Object(body))))
}

/// Delete a document and respond with its id.
/// Responds the same whether or not a document matched.
/// DELETE /api/<collection>/:id
pub async fn delete_document(
    State(state): State<CollectionState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let collection = state.collection;
    info!("Deleting {} with id: {}", collection.singular, id);

    state
        .store
        .delete_by_id(collection.name, &id)
        .await
        .map_err(|e| ApiError::operation_failed(collection.delete_failed(), e))?;

    Ok((StatusCode::OK, Json(id)))
}
