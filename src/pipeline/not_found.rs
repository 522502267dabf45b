//! Fallback for requests no route matched.

use crate::error::ApiError;

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
