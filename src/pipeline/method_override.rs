//! Method override for clients that can only send GET and POST.

use async_trait::async_trait;
use axum::http::{HeaderName, Method};

use crate::pipeline::stage::{Outcome, RequestContext, Stage};

/// Header naming the intended method.
pub static X_HTTP_METHOD_OVERRIDE: HeaderName = HeaderName::from_static("x-http-method-override");

/// The method the client actually sent, recorded when it was overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalMethod(pub Method);

/// Replaces the method of a `POST` with the value of
/// `X-HTTP-Method-Override`. Unknown values are ignored.
#[derive(Debug, Clone, Default)]
pub struct MethodOverride;

impl MethodOverride {
    fn requested(ctx: &RequestContext) -> Option<Method> {
        let value = ctx.headers().get(&X_HTTP_METHOD_OVERRIDE)?.to_str().ok()?;
        let method = Method::from_bytes(value.trim().to_ascii_uppercase().as_bytes()).ok()?;
        is_standard(&method).then_some(method)
    }
}

fn is_standard(method: &Method) -> bool {
    [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
        Method::TRACE,
        Method::CONNECT,
    ]
    .contains(method)
}

#[async_trait]
impl Stage for MethodOverride {
    fn name(&self) -> &'static str {
        "method-override"
    }

    async fn handle(&self, ctx: &mut RequestContext) -> Outcome {
        if ctx.method() != Method::POST {
            return Outcome::Continue;
        }

        if let Some(method) = Self::requested(ctx) {
            tracing::debug!(from = %ctx.method(), to = %method, "Method overridden");
            let request = ctx.request_mut();
            let original = std::mem::replace(request.method_mut(), method);
            request.extensions_mut().insert(OriginalMethod(original));
        }

        Outcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    async fn run(method: Method, header: Option<&str>) -> RequestContext {
        let mut builder = Request::builder().method(method).uri("/api/users/1");
        if let Some(value) = header {
            builder = builder.header(&X_HTTP_METHOD_OVERRIDE, value);
        }
        let mut ctx = RequestContext::new(builder.body(Body::empty()).unwrap());
        assert!(matches!(MethodOverride.handle(&mut ctx).await, Outcome::Continue));
        ctx
    }

    #[tokio::test]
    async fn overrides_post() {
        let ctx = run(Method::POST, Some("delete")).await;
        assert_eq!(ctx.method(), Method::DELETE);
        assert_eq!(
            ctx.request().extensions().get::<OriginalMethod>(),
            Some(&OriginalMethod(Method::POST))
        );
    }

    #[tokio::test]
    async fn ignores_other_methods() {
        let ctx = run(Method::GET, Some("DELETE")).await;
        assert_eq!(ctx.method(), Method::GET);
    }

    #[tokio::test]
    async fn ignores_unknown_values() {
        let ctx = run(Method::POST, Some("FROBNICATE")).await;
        assert_eq!(ctx.method(), Method::POST);
        assert!(ctx.request().extensions().get::<OriginalMethod>().is_none());
    }
}
