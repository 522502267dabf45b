//! Routes served by the server itself. Application routes are supplied by
//! the embedding crate and merged in through [`PipelineBuilder::routes`].
//!
//! [`PipelineBuilder::routes`]: crate::pipeline::PipelineBuilder::routes

use axum::routing::get;
use axum::Router;

pub fn api_router() -> Router {
    Router::new().route("/health-check", get(health_check))
}

async fn health_check() -> &'static str {
    "OK"
}
