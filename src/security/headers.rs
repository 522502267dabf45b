//! Security response headers.
//!
//! # Responsibilities
//! - Define the hardening headers sent with every response
//! - Never overwrite a header a handler set explicitly
//!
//! # Design Decisions
//! - Each header is its own `SetResponseHeaderLayer::if_not_present`
//! - `Strict-Transport-Security` is omitted when its max-age is zero

use axum::http::{header, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::SecurityConfig;

/// The headers to add, in a stable order. Empty when disabled.
pub fn security_headers(config: &SecurityConfig) -> Vec<(HeaderName, HeaderValue)> {
    if !config.enable_headers {
        return Vec::new();
    }

    let mut headers = vec![
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self';base-uri 'self';frame-ancestors 'self';object-src 'none'"),
        ),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
        (HeaderName::from_static("x-download-options"), HeaderValue::from_static("noopen")),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
    ];

    if config.hsts_max_age_secs > 0 {
        let value = format!("max-age={}; includeSubDomains", config.hsts_max_age_secs);
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.push((header::STRICT_TRANSPORT_SECURITY, value));
        }
    }

    headers
}

/// One layer per header.
pub fn security_header_layers(config: &SecurityConfig) -> Vec<SetResponseHeaderLayer<HeaderValue>> {
    security_headers(config)
        .into_iter()
        .map(|(name, value)| SetResponseHeaderLayer::if_not_present(name, value))
        .collect()
}
