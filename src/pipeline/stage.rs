//! The stage abstraction.
//!
//! A stage inspects (and may rewrite) the inbound request before route
//! matching, then says whether the request continues, is answered right
//! away, or fails.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, Uri};
use axum::response::Response;

use crate::error::Failure;

/// What a stage decided.
#[derive(Debug)]
pub enum Outcome {
    /// Hand the request to the next stage.
    Continue,
    /// Answer now; later stages and route dispatch are skipped.
    Respond(Response),
    /// Abort with a failure; it is normalized and rendered by the responder.
    Fail(Failure),
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Outcome::Fail(failure)
    }
}

/// One step of the request pipeline.
#[async_trait]
pub trait Stage: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn handle(&self, ctx: &mut RequestContext) -> Outcome;
}

/// The inbound request, owned by the pipeline for the lifetime of one request.
#[derive(Debug)]
pub struct RequestContext {
    request: Request<Body>,
}

impl RequestContext {
    pub fn new(request: Request<Body>) -> Self {
        Self { request }
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    pub fn request(&self) -> &Request<Body> {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request<Body> {
        &mut self.request
    }

    pub fn into_request(self) -> Request<Body> {
        self.request
    }
}
