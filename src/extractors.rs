use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::JsonDocument;

/// JSON object request body.
///
/// Replaces axum's plain-text rejections with the API's `{"error": ...}`
/// shape and refuses arrays and scalars, which cannot be stored as documents.
#[derive(Debug)]
pub struct DocumentBody(pub JsonDocument);

#[async_trait]
impl<S> FromRequest<S> for DocumentBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(DocumentBody(map)),
            _ => Err(ApiError::validation("Request body must be a JSON object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;
    use serde_json::json;

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_object() {
        let DocumentBody(map) = DocumentBody::from_request(json_request(r#"{"name":"Ohio"}"#), &())
            .await
            .unwrap();

        assert_eq!(Value::Object(map), json!({ "name": "Ohio" }));
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let result = DocumentBody::from_request(json_request(r#"["Ohio"]"#), &()).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let result = DocumentBody::from_request(json_request(r#"{"name":"#), &()).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rejects_missing_content_type() {
        let request = http::Request::builder()
            .method("POST")
            .body(Body::from(r#"{"name":"Ohio"}"#))
            .unwrap();

        let result = DocumentBody::from_request(request, &()).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
