//! Field-level validation failures.

use std::fmt;

use axum::http::StatusCode;
use serde::Serialize;

/// Separator between the messages of one field.
pub const FIELD_MESSAGE_SEPARATOR: &str = ".";
/// Separator between field groups.
pub const FIELD_GROUP_SEPARATOR: &str = " and ";

/// Where in the request a rejected field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Body,
    Query,
    Params,
}

/// All messages reported for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub location: Location,
    pub messages: Vec<String>,
}

/// A structured collection of field-level messages produced by request
/// validation. Groups keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    status: StatusCode,
    errors: Vec<FieldError>,
}

impl Default for ValidationFailure {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationFailure {
    pub fn new() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            errors: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Record a message for `field`, appending to its group if one exists.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        match self.errors.iter_mut().find(|e| e.field == field) {
            Some(group) => group.messages.push(message.into()),
            None => self.errors.push(FieldError {
                field,
                location: Location::default(),
                messages: vec![message.into()],
            }),
        }
    }

    /// Builder form of [`add`](Self::add).
    pub fn field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Mark every group as coming from `location`.
    pub fn at(mut self, location: Location) -> Self {
        for group in &mut self.errors {
            group.location = location;
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Flatten all groups into one human-readable message.
    pub fn combined_message(&self) -> String {
        self.errors
            .iter()
            .map(|group| group.messages.join(FIELD_MESSAGE_SEPARATOR))
            .collect::<Vec<_>>()
            .join(FIELD_GROUP_SEPARATOR)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.combined_message())
    }
}

impl std::error::Error for ValidationFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_within_and_across_groups() {
        let failure = ValidationFailure::new()
            .field("username", "\"username\" is required")
            .field("password", "\"password\" is too short")
            .field("username", "\"username\" must be a string");

        assert_eq!(
            failure.combined_message(),
            "\"username\" is required.\"username\" must be a string and \"password\" is too short"
        );
        assert_eq!(failure.errors().len(), 2);
    }

    #[test]
    fn empty_failure_is_ok() {
        assert!(ValidationFailure::new().into_result().is_ok());
        assert!(ValidationFailure::new().field("a", "bad").into_result().is_err());
    }

    #[test]
    fn location_is_applied_to_all_groups() {
        let failure = ValidationFailure::new()
            .field("page", "must be positive")
            .field("limit", "too large")
            .at(Location::Query);
        assert!(failure.errors().iter().all(|e| e.location == Location::Query));
    }
}
