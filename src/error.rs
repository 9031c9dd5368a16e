use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by a document store. Every variant is surfaced to HTTP
/// callers as the same generic "operation failed" response.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid document id '{0}': must be a 24 character hex string")]
    InvalidId(String),

    #[error("Duplicate document id {0}")]
    DuplicateId(String),

    #[error("Update document must not be empty")]
    EmptyUpdate,

    #[error("Document serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{message}")]
    OperationFailed {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wraps a store failure with the fixed message returned to the client.
    pub fn operation_failed(message: impl Into<String>, source: StoreError) -> Self {
        Self::OperationFailed {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            ApiError::Validation(message) => {
                tracing::warn!("Rejected request: {}", message);
                message
            }
            ApiError::OperationFailed { message, source } => {
                // The cause stays in the logs; callers only see the generic message
                match source {
                    StoreError::Mongo(ref err) => {
                        tracing::error!(error = %err, kind = ?err.kind, "{}", message);
                    }
                    ref other => {
                        tracing::error!(error = %other, "{}", message);
                    }
                }
                message
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// Result type alias for convenience
pub type ApiResult<T> = Result<T, ApiError>;
