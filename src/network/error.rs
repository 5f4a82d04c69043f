//! HTTP error mapping
//!
//! | Error            | Status |
//! |------------------|--------|
//! | InvalidParameter | 400    |
//! | bad request body | 400    |
//! | NotFound         | 404    |
//! | KeyConflict      | 409    |
//! | anything else    | 500    |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::RowKvError;

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// An error from the record store
    Store(RowKvError),

    /// Malformed path, query string, or body (rejected before the store)
    BadRequest(String),

    /// The blocking task running a store call failed to complete
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(e) if e.is_storage_failure() => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(RowKvError::InvalidParameter(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(RowKvError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(RowKvError::KeyConflict(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Store(RowKvError::NotFound(_)) => "Entry not found".to_string(),
            ApiError::Store(RowKvError::KeyConflict(_)) => "Key already exists".to_string(),
            ApiError::Store(e) => e.to_string(),
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RowKvError> for ApiError {
    fn from(err: RowKvError) -> Self {
        ApiError::Store(err)
    }
}
