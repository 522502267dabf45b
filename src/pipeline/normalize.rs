//! Error normalization.
//!
//! Collapses every [`Failure`] into one [`ApiError`] before it reaches the
//! terminal responder. Pure: no I/O, no logging.

use axum::http::StatusCode;

use crate::error::{ApiError, Failure};

pub fn normalize(failure: Failure) -> ApiError {
    match failure {
        Failure::Validation(validation) => {
            ApiError::public(validation.combined_message(), validation.status())
        }
        Failure::Application(err) => err,
        Failure::Unhandled(err) => {
            ApiError::new(err.to_string(), err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
                .with_public(err.is_public().unwrap_or(false))
                .with_stack(err.stack())
        }
    }
}
