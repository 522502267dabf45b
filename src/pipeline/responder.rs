//! Terminal error responder.
//!
//! Serializes the normalized error as `{ "message": ..., "stack": ... }`
//! with the error's status. Never forwards.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::config::Environment;
use crate::error::ApiError;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
    pub stack: Value,
}

impl<'a> ErrorBody<'a> {
    /// `stack` carries the trace only when `expose_stack` is set and one
    /// exists; otherwise it is an empty object.
    pub fn new(err: &'a ApiError, expose_stack: bool) -> Self {
        let stack = match err.stack() {
            Some(stack) if expose_stack => Value::String(stack.to_string()),
            _ => Value::Object(Default::default()),
        };
        Self {
            message: err.exposed_message(),
            stack,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ErrorResponder {
    environment: Environment,
}

impl ErrorResponder {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Render `err` for the running environment.
    pub fn respond(&self, err: ApiError) -> Response {
        match self.environment {
            Environment::Development => {
                tracing::error!(
                    status = err.status().as_u16(),
                    error = err.message(),
                    stack = err.stack().unwrap_or_default(),
                    "Request failed"
                );
            }
            Environment::Production if err.status().is_server_error() => {
                tracing::error!(
                    status = err.status().as_u16(),
                    error = err.message(),
                    "Request failed"
                );
            }
            _ => {}
        }

        let body = ErrorBody::new(&err, self.environment.is_development());
        (err.status(), Json(body)).into_response()
    }

    /// Finish a dispatched response: errors carried in the extensions are
    /// re-rendered, and bare error statuses produced outside the handlers
    /// are normalized into the same shape.
    pub fn finalize(&self, mut response: Response) -> Response {
        if let Some(err) = response.extensions_mut().remove::<ApiError>() {
            return self.respond(err);
        }

        let status = response.status();
        if (status.is_client_error() || status.is_server_error()) && !is_json(&response) {
            return self.respond(ApiError::from_status(status));
        }

        response
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Middleware wrapping route dispatch.
pub async fn terminal_responder(
    State(responder): State<ErrorResponder>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    responder.finalize(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn development_exposes_stack() {
        let responder = ErrorResponder::new(Environment::Development);
        let err = ApiError::internal("disk full").with_stack("at write()");

        let response = responder.respond(err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Internal Server Error");
        assert_eq!(json["stack"], "at write()");
    }

    #[tokio::test]
    async fn production_hides_stack() {
        let responder = ErrorResponder::new(Environment::Production);
        let err = ApiError::public("bad token", StatusCode::UNAUTHORIZED).with_stack("at auth()");

        let json = body_json(responder.respond(err)).await;
        assert_eq!(json["message"], "bad token");
        assert_eq!(json["stack"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn finalize_normalizes_bare_error_status() {
        let responder = ErrorResponder::new(Environment::Test);
        let bare = (StatusCode::METHOD_NOT_ALLOWED, "").into_response();

        let response = responder.finalize(bare);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn finalize_leaves_json_and_success_alone() {
        let responder = ErrorResponder::new(Environment::Test);

        let ok = responder.finalize((StatusCode::OK, "fine").into_response());
        assert_eq!(ok.status(), StatusCode::OK);

        let custom = (StatusCode::CONFLICT, Json(serde_json::json!({ "reason": "dup" }))).into_response();
        let json = body_json(responder.finalize(custom)).await;
        assert_eq!(json["reason"], "dup");
    }
}
