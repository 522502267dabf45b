//! Error types shared by every stage of the request pipeline.
//!
//! # Taxonomy
//! ```text
//! Failure
//!     ├─ Validation(ValidationFailure)   field messages, public, usually 400
//!     ├─ Application(ApiError)           explicit status / message / publicness
//!     └─ Unhandled(UnhandledError)       anything else, 500 and private by default
//!
//! pipeline::normalize(Failure) → ApiError → terminal responder
//! ```
//!
//! Handlers return `Result<T, Failure>` and convert with `?`.

pub mod api_error;
pub mod failure;
pub mod validation;

pub use api_error::{canonical_text, ApiError, NOT_FOUND_MESSAGE};
pub use failure::{BoxError, Failure, UnhandledError};
pub use validation::{FieldError, Location, ValidationFailure};
