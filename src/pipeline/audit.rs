//! Structured request/response audit log.
//!
//! One `audit` event per request, after the response is produced, plus the
//! request counters in [`crate::observability::metrics`].

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::http::request::request_id;
use crate::observability::metrics;

pub async fn audit_log(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request_id(request.headers()).unwrap_or("unknown").to_string();

    let response = next.run(request).await;
    let status = response.status();

    tracing::info!(
        target: "audit",
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = status.as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "HTTP {} {}",
        method,
        uri.path()
    );
    metrics::record_request(method.as_str(), status.as_u16(), start);

    response
}
