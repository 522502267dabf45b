//! Pipeline construction.
//!
//! Layers are added innermost first, so the list below reads bottom-up
//! relative to the request path:
//!
//! ```text
//! response compression             (outermost)
//! request id (set, propagate)
//! CORS
//! security headers
//! access log
//! audit log
//! stages (method override, ...)    pre-routing, may rewrite the request
//! ───── route matching ─────
//! terminal responder
//! request decompression
//! body limit
//! dispatch: {prefix}/* routes, fallback = not found
//! ```
//!
//! Decompression sits inside the responder so an unsupported
//! `Content-Encoding` (415) is rendered like any other error, and the body
//! limit applies to the decoded bytes.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::config::AppConfig;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::observability::access_log_layer;
use crate::pipeline::audit::audit_log;
use crate::pipeline::method_override::MethodOverride;
use crate::pipeline::normalize::normalize;
use crate::pipeline::not_found::not_found;
use crate::pipeline::responder::{terminal_responder, ErrorResponder};
use crate::pipeline::stage::{Outcome, RequestContext, Stage};
use crate::security::{cors_layer, security_header_layers};

/// Composes configuration, an ordered stage list and the mounted routes
/// into one servable [`Router`].
pub struct PipelineBuilder<'a> {
    config: &'a AppConfig,
    stages: Vec<Arc<dyn Stage>>,
    routes: Router,
}

impl<'a> PipelineBuilder<'a> {
    /// Starts with the method-override stage and no routes.
    pub fn new(config: &'a AppConfig) -> Self {
        Self {
            config,
            stages: vec![Arc::new(MethodOverride)],
            routes: Router::new(),
        }
    }

    /// Append a stage. Stages run in registration order.
    pub fn stage<S: Stage>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Routes to mount under the configured prefix. Merged with any
    /// previously supplied routes.
    pub fn routes(mut self, routes: Router) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    /// Assemble the servable router.
    ///
    /// The prefix is mounted with one leading and no trailing slash; an
    /// empty or `/` prefix mounts the routes at the root.
    pub fn build(self) -> Router {
        let config = self.config;
        let environment = config.environment;
        let responder = ErrorResponder::new(environment);

        let mounted = match mount_path(&config.api.prefix) {
            Some(prefix) => Router::new().nest(&prefix, self.routes),
            None => self.routes,
        };

        let mut dispatch = mounted
            .fallback(not_found)
            .layer(DefaultBodyLimit::max(config.security.max_body_size));

        if config.compression.enabled {
            dispatch = dispatch.layer(RequestDecompressionLayer::new());
        }

        let dispatch = dispatch.layer(middleware::from_fn_with_state(responder, terminal_responder));

        let runner = StageRunner {
            stages: self.stages.into(),
            responder,
        };

        // Stages wrap the whole dispatch router so they run before route
        // matching.
        let mut app = Router::new()
            .fallback_service(dispatch)
            .layer(middleware::from_fn_with_state(runner, run_stages));

        if environment.request_logging_enabled() {
            app = app.layer(middleware::from_fn(audit_log));
        }

        if let Some(access_log) = access_log_layer(environment) {
            app = app.layer(access_log);
        }

        for layer in security_header_layers(&config.security) {
            app = app.layer(layer);
        }

        app = app
            .layer(cors_layer(&config.cors))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), UuidRequestId));

        if config.compression.enabled {
            app = app.layer(CompressionLayer::new());
        }

        tracing::debug!(
            environment = %environment,
            prefix = %config.api.prefix,
            "Request pipeline built"
        );

        app
    }
}

/// Normalized mount point for the API prefix, `None` for the root.
fn mount_path(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}

#[derive(Clone)]
struct StageRunner {
    stages: Arc<[Arc<dyn Stage>]>,
    responder: ErrorResponder,
}

async fn run_stages(
    State(runner): State<StageRunner>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut ctx = RequestContext::new(request);

    for stage in runner.stages.iter() {
        match stage.handle(&mut ctx).await {
            Outcome::Continue => {}
            Outcome::Respond(response) => {
                tracing::debug!(stage = stage.name(), "Stage answered request");
                return response;
            }
            Outcome::Fail(failure) => {
                tracing::debug!(stage = stage.name(), error = %failure, "Stage failed");
                return runner.responder.respond(normalize(failure));
            }
        }
    }

    next.run(ctx.into_request()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_path_normalizes_slashes() {
        assert_eq!(mount_path("/api"), Some("/api".to_string()));
        assert_eq!(mount_path("/api/"), Some("/api".to_string()));
        assert_eq!(mount_path("v1"), Some("/v1".to_string()));
        assert_eq!(mount_path("/v1/admin"), Some("/v1/admin".to_string()));
        assert_eq!(mount_path("/"), None);
        assert_eq!(mount_path(""), None);
    }
}
