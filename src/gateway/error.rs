use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::identity::MetadataError;
use crate::matcher::MatchError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("payload too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("no reference photo on record for identity {0}")]
    IdentityNotFound(i64),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("metadata store unavailable: {0}")]
    MetadataUnavailable(String),
}

impl From<MatchError> for GatewayError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::StorageUnavailable(e) => GatewayError::StorageUnavailable(e.to_string()),
        }
    }
}

impl From<MetadataError> for GatewayError {
    fn from(err: MetadataError) -> Self {
        GatewayError::MetadataUnavailable(err.to_string())
    }
}

impl From<crate::corpus::CorpusError> for GatewayError {
    fn from(err: crate::corpus::CorpusError) -> Self {
        GatewayError::StorageUnavailable(err.to_string())
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::IdentityNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::StorageUnavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::MetadataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            success: false,
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
