//! Failure values produced at the failure site.

use std::error::Error as StdError;
use std::fmt::Write as _;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::{ApiError, ValidationFailure};
use crate::pipeline::normalize::normalize;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Every way a request can fail before it reaches the terminal responder.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// Request-schema validation rejected one or more fields.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// Raised deliberately by handler code with an explicit status.
    #[error(transparent)]
    Application(#[from] ApiError),
    /// Anything else.
    #[error(transparent)]
    Unhandled(#[from] UnhandledError),
}

impl Failure {
    /// Wrap an arbitrary error as an internal failure.
    pub fn unhandled<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Failure::Unhandled(UnhandledError::new(err))
    }
}

impl From<JsonRejection> for Failure {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        Failure::Unhandled(UnhandledError::new(rejection).with_status(status))
    }
}

impl From<QueryRejection> for Failure {
    fn from(rejection: QueryRejection) -> Self {
        let status = rejection.status();
        Failure::Unhandled(UnhandledError::new(rejection).with_status(status))
    }
}

impl From<PathRejection> for Failure {
    fn from(rejection: PathRejection) -> Self {
        let status = rejection.status();
        Failure::Unhandled(UnhandledError::new(rejection).with_status(status))
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        normalize(self).into_response()
    }
}

/// An error of unknown shape, optionally annotated with a status and a
/// publicness flag.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct UnhandledError {
    source: BoxError,
    status: Option<StatusCode>,
    is_public: Option<bool>,
}

impl UnhandledError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            source: err.into(),
            status: None,
            is_public: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn is_public(&self) -> Option<bool> {
        self.is_public
    }

    /// Debug rendering of the error followed by its source chain.
    pub fn stack(&self) -> String {
        let mut out = format!("{:?}", self.source);
        let mut next = self.source.source();
        while let Some(cause) = next {
            let _ = write!(out, "\n    caused by: {cause}");
            next = cause.source();
        }
        out
    }
}
