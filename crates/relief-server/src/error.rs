//! Error types for the operations API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Not-found and insufficient-stock conditions are client-visible
//! results, distinct from server faults.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use relief_engine::EngineError;

/// Errors that can occur in the operations API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request payload was missing or malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request conflicts with current stock levels.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::CityNotFound(_)
            | EngineError::DisasterNotFound(_)
            | EngineError::HubNotFound(_) => Self::NotFound(err.to_string()),
            EngineError::EmptyRequest(_) => Self::BadRequest(err.to_string()),
            EngineError::InsufficientStock { .. } => Self::Conflict(err.to_string()),
            EngineError::ArithmeticOverflow | EngineError::Internal(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
