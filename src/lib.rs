//! Web API server front end: a fixed middleware pipeline ending in one
//! uniform JSON error responder.

pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod routes;
pub mod security;

pub use config::{AppConfig, Environment};
pub use error::{ApiError, Failure, ValidationFailure};
pub use extract::{Valid, ValidQuery, Validate};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::PipelineBuilder;
