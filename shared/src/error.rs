use lambda_http::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::store::StoreError;

/// Handler-level error taxonomy. Every failure a handler can hit maps onto
/// exactly one of these, and each variant owns its status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or mistyped required field. Returned before any store call.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Ownership mismatch: the record exists but belongs to someone else.
    #[error("{0}")]
    Forbidden(String),

    /// Store failure or malformed request JSON. Parse failures land here
    /// (as a 500) to match the deployed behavior of this API.
    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body for this error. Internal errors carry the underlying
    /// error text under a separate key.
    pub fn body(&self) -> Value {
        match self {
            ApiError::Internal(detail) => {
                json!({ "message": "Internal Server Error", "error": detail })
            }
            other => json!({ "message": other.to_string() }),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
