//! Error types for pricelist-server
//!
//! Every failure reaching the HTTP caller is a JSON object with an `error`
//! message and, where useful, a `details` string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::FetchError;

/// Message sent when the upstream payload has no usable product array
pub const MALFORMED_PAYLOAD_ERROR: &str = "Unable to retrieve data from API";
pub const MALFORMED_PAYLOAD_DETAILS: &str = "Invalid data structure received";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Not Found")]
    NotFound,

    /// Upstream price list could not be fetched (500)
    #[error(transparent)]
    Upstream(#[from] FetchError),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string(), None),
            ApiError::Upstream(FetchError::MalformedPayload(reason)) => {
                tracing::warn!(reason = %reason, "Upstream payload rejected");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MALFORMED_PAYLOAD_ERROR.to_string(),
                    Some(MALFORMED_PAYLOAD_DETAILS.to_string()),
                )
            }
            ApiError::Upstream(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
