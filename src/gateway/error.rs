use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::gateway::{LODESTONE_STATUS_ERROR, LODESTONE_STATUS_HEADER};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message, gateway_status) = match &self {
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), "invalid_request")
            }
            // Input-contract violations are the caller's to fix; everything
            // else that escapes the embedding layer is a server-side fault.
            GatewayError::Embedding(
                EmbeddingError::EmptyText | EmbeddingError::BatchSizeExceeded { .. },
            ) => (StatusCode::BAD_REQUEST, self.to_string(), "invalid_request"),
            GatewayError::Embedding(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
                "embedding_error",
            ),
            GatewayError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
                "internal_error",
            ),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            LODESTONE_STATUS_HEADER,
            HeaderValue::from_str(gateway_status)
                .unwrap_or(HeaderValue::from_static(LODESTONE_STATUS_ERROR)),
        );

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
