//! # API Error Type
//!
//! What HTTP clients see when a request fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Till Checkout                          │
//! │                                                                         │
//! │  POST /checkout                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Body not valid JSON? ─── JsonRejection ────────────┐                  │
//! │         │                                           │                  │
//! │         ▼                                           ▼                  │
//! │  CheckoutEngine::execute ─── CheckoutError ──► ApiError ──► 400        │
//! │         │                                    { "message": "..." }      │
//! │         ▼                                                               │
//! │  200 CheckoutResult                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a 400 carrying the error's message, so clients keep
//! matching on the message text.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use till_core::CheckoutError;

/// Error body returned by every endpoint.
///
/// ```json
/// { "message": "Invalid Customer Document" }
/// ```
#[derive(Debug, Clone, Error, Serialize)]
#[error("[{status}] {message}")]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, message)
    }
}

/// Converts checkout errors to API errors.
impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        if !err.is_validation() {
            tracing::error!(error = %err, "Checkout lookup failed");
        }
        ApiError::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::LookupError;

    #[test]
    fn test_checkout_error_keeps_message() {
        let err: ApiError = CheckoutError::InvalidDocument.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid Customer Document");
    }

    #[test]
    fn test_lookup_error_is_bad_request() {
        let err: ApiError = CheckoutError::from(LookupError::unavailable("database", "closed")).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "database unavailable: closed");
    }

    #[test]
    fn test_body_shape() {
        let json = serde_json::to_value(ApiError::bad_request("Invalid Coupon Code")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Invalid Coupon Code" }));
    }
}
