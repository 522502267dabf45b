//! Validating extractors.
//!
//! Decoding errors surface as unhandled failures with the decoder's status
//! (400, 413, 415 and so on, messages not public); schema violations
//! surface as [`Failure::Validation`].

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::{Failure, Location, ValidationFailure};

/// Request-schema validation.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationFailure>;
}

/// A JSON body that decoded and validated.
#[derive(Debug, Clone)]
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(|failure| failure.at(Location::Body))?;
        Ok(Valid(value))
    }
}

/// A query string that decoded and validated.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate().map_err(|failure| failure.at(Location::Query))?;
        Ok(ValidQuery(value))
    }
}
