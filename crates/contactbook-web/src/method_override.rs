//! HTTP method override for HTML forms.
//!
//! Browsers only submit forms with GET or POST. A POST whose query string
//! carries `_method=DELETE` (or `PUT`, `PATCH`) is rewritten to that method
//! before it reaches the router.

use std::task::{Context, Poll};

use http::{Method, Request};
use tower::{Layer, Service};

/// Query parameter naming the intended method.
pub const OVERRIDE_PARAM: &str = "_method";

/// Tower `Layer` that applies `?_method=` overrides.
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodOverrideLayer;

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

/// Tower `Service` that rewrites overridden POST requests.
#[derive(Clone, Debug)]
pub struct MethodOverride<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for MethodOverride<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if req.method() == Method::POST
            && let Some(method) = override_method(req.uri().query())
        {
            tracing::trace!(%method, path = %req.uri().path(), "Method override");
            *req.method_mut() = method;
        }
        self.inner.call(req)
    }
}

/// The overriding method named in `query`, if it is one forms may tunnel.
fn override_method(query: Option<&str>) -> Option<Method> {
    let value = query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == OVERRIDE_PARAM)
        .map(|(_, value)| value)?;

    match value.to_ascii_uppercase().as_str() {
        "DELETE" => Some(Method::DELETE),
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        _ => None,
    }
}
