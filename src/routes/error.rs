//! API error responder.
//!
//! Every endpoint fails with the same envelope: `{ "error": <message> }`
//! attached to a non-2xx status. Input validation failures are 400 with an
//! adapter-authored message; service failures are 500 carrying the service
//! error's own message (or the adapter's fallback when it is empty).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::services::ServiceError;

#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, message: message.into() }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }

    /// Map a service failure to 500, forwarding its message verbatim.
    #[must_use]
    pub fn from_service(err: &ServiceError, fallback: &str) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::internal(fallback)
        } else {
            Self::internal(message)
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
