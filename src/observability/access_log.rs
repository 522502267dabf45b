//! Access log.
//!
//! A `TraceLayer` span per request. Development logs at debug level with
//! request headers; production logs at info level without them.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::config::Environment;

pub type AccessLogLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse>;

/// The access log for `environment`, or `None` where request logging is off.
pub fn access_log_layer(environment: Environment) -> Option<AccessLogLayer> {
    if !environment.request_logging_enabled() {
        return None;
    }

    let (level, include_headers) = if environment.is_development() {
        (Level::DEBUG, true)
    } else {
        (Level::INFO, false)
    };

    Some(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(level).include_headers(include_headers))
            .on_request(DefaultOnRequest::new().level(level))
            .on_response(
                DefaultOnResponse::new()
                    .level(level)
                    .latency_unit(LatencyUnit::Millis)
                    .include_headers(include_headers),
            ),
    )
}
