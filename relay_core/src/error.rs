//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::contact::ErrorBody;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub const INVALID_JSON_MESSAGE: &str = "Corps de requête JSON invalide";

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_)
            | AppError::Provider(_)
            | AppError::Internal(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text shown to the submitter.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidJson(_) => INVALID_JSON_MESSAGE.to_string(),
            AppError::Validation(msg) | AppError::Configuration(msg) | AppError::Provider(msg) => {
                msg.clone()
            }
            AppError::Internal(_) | AppError::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::InvalidJson(detail) => {
                tracing::debug!(detail = %detail, "rejected malformed request body");
            }
            AppError::Validation(msg) => {
                tracing::debug!(reason = %msg, "rejected contact submission");
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
            }
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {}", msg);
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
            }
        }

        let body = Json(ErrorBody {
            error: self.public_message(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let response = AppError::Validation("Adresse email invalide".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "Adresse email invalide" }));
    }

    #[tokio::test]
    async fn test_provider_error_keeps_message() {
        let response = AppError::Provider("Key not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Key not found");
    }

    #[tokio::test]
    async fn test_internal_details_are_not_exposed() {
        let err = AppError::from(anyhow::anyhow!("socket exploded at 0xdeadbeef"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = AppError::Internal("failed to render notification email".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[test]
    fn test_invalid_json_uses_fixed_message() {
        let err = AppError::InvalidJson("EOF while parsing".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), INVALID_JSON_MESSAGE);
    }
}
