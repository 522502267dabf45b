//! The uniform error shape every failure is normalized into.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::pipeline::responder::ErrorBody;

/// Message sent for requests that match no route.
pub const NOT_FOUND_MESSAGE: &str = "API not found!";

/// Normalized error: a status, a message, whether the message may be shown
/// to the caller, and an optional diagnostic trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: StatusCode,
    is_public: bool,
    stack: Option<String>,
}

impl ApiError {
    /// A non-public error. Callers see only the canonical status text.
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
            is_public: false,
            stack: None,
        }
    }

    /// An error whose message is safe to return to the caller.
    pub fn public(message: impl Into<String>, status: StatusCode) -> Self {
        Self::new(message, status).with_public(true)
    }

    /// 500 with a message that stays server-side.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn not_found() -> Self {
        Self::public(NOT_FOUND_MESSAGE, StatusCode::NOT_FOUND)
    }

    /// Error for a bare status code, messaged with its reason phrase.
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(canonical_text(status), status)
    }

    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// The message the caller is allowed to see.
    pub fn exposed_message(&self) -> &str {
        if self.is_public {
            &self.message
        } else {
            canonical_text(self.status)
        }
    }
}

/// Standard reason phrase for a status code.
pub fn canonical_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Error")
}

/// Renders the production body and carries the error in the response
/// extensions so the terminal responder can re-render it for the running
/// environment.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(&self, false);
        let mut response = (self.status, Json(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_errors_expose_reason_phrase() {
        let err = ApiError::internal("db pool exhausted");
        assert_eq!(err.exposed_message(), "Internal Server Error");
        assert_eq!(err.to_string(), "db pool exhausted");
    }

    #[test]
    fn public_errors_expose_message() {
        let err = ApiError::public("email already taken", StatusCode::CONFLICT);
        assert_eq!(err.exposed_message(), "email already taken");
    }

    #[test]
    fn not_found_is_public_404() {
        let err = ApiError::not_found();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.is_public());
        assert_eq!(err.message(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn into_response_keeps_error_in_extensions() {
        let err = ApiError::public("nope", StatusCode::FORBIDDEN).with_stack("trace");
        let response = err.clone().into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.extensions().get::<ApiError>(), Some(&err));
    }
}
