use crate::domain::contact::ValidationError;
use crate::storage::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No search query provided")]
    MissingQuery,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Contact store error: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to load contacts: {0}")]
    ContactsUnavailable(#[source] StoreError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(e) => {
                tracing::debug!(error = %e, "Validation failed");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::MissingQuery => {
                tracing::debug!("Search without query");
                (StatusCode::BAD_REQUEST, "No search query provided".to_string())
            }
            Self::BadRequest(detail) => {
                // Decoder detail names internal types; it stays in the logs.
                tracing::debug!(detail = %detail, "Bad request");
                (StatusCode::BAD_REQUEST, "Invalid request".to_string())
            }
            Self::Store(e) => {
                tracing::error!(error = %e, "Contact store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            Self::ContactsUnavailable(e) => {
                tracing::error!(error = %e, "Failed to load contacts");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load contacts".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_hides_decoder_detail() {
        let detail = "Failed to deserialize the JSON body into the target type: name: invalid type: integer `5`, \
                      expected a string at line 1 column 10 (itsite_server::api::schemas::contacts::SubmitContactRequest)";
        let (status, body) = body_of(AppError::BadRequest(detail.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid request" }));
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let err = StoreError::Io {
            path: "/srv/contacts.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let (status, body) = body_of(AppError::Store(err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
