//! Signed-cookie session middleware.
//!
//! `SessionLayer` and `SessionService` give every request a [`SessionId`]
//! (found in request extensions). The id travels in a cookie of the form
//! `<uuid>.<mac>`, where the MAC is a blake3 keyed hash of the uuid. Missing,
//! malformed, or tampered cookies start a fresh session.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::body::Body;
use axum::response::IntoResponse;
use http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "contactbook.sid";

const KEY_CONTEXT: &str = "contactbook session cookie v1";

// ============================================================================
// SessionId
// ============================================================================

/// Identifier of one browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Signing key and cookie lifetime for the session layer.
#[derive(Clone)]
pub struct SessionConfig {
    key: [u8; 32],
    max_age: Duration,
}

impl SessionConfig {
    /// Derive the cookie signing key from `secret`.
    pub fn new(secret: &str, max_age: Duration) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
            max_age,
        }
    }

    /// How long a session (and its pending flash messages) lives.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    fn sign(&self, id: SessionId) -> blake3::Hash {
        blake3::keyed_hash(&self.key, id.0.as_bytes())
    }

    /// Cookie value for `id`: `<uuid>.<mac hex>`.
    pub fn cookie_value(&self, id: SessionId) -> String {
        format!("{}.{}", id.0, self.sign(id).to_hex())
    }

    /// Recover the session id from a cookie value, checking its signature.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (raw_id, mac) = value.split_once('.')?;
        let id = SessionId(Uuid::parse_str(raw_id).ok()?);
        let mac = blake3::Hash::from_hex(mac).ok()?;
        // blake3::Hash equality is constant-time
        (self.sign(id) == mac).then_some(id)
    }

    /// Full `Set-Cookie` header value for `id`.
    pub fn set_cookie_header(&self, id: SessionId) -> String {
        format!(
            "{SESSION_COOKIE}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_value(id),
            self.max_age.as_secs()
        )
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tower middleware
// ============================================================================

/// Tower `Layer` that attaches a [`SessionId`] to every request.
#[derive(Clone, Debug)]
pub struct SessionLayer {
    config: Arc<SessionConfig>,
}

impl SessionLayer {
    /// Create a new session layer.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that resolves the session cookie before forwarding requests.
///
/// The cookie is re-issued on every response so an active session keeps
/// sliding forward.
#[derive(Clone, Debug)]
pub struct SessionService<S> {
    inner: S,
    config: Arc<SessionConfig>,
}

impl<S> Service<Request<Body>> for SessionService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let config = self.config.clone();

        Box::pin(async move {
            let session = match extract_session_cookie(&req) {
                Some(value) => config.verify(value).unwrap_or_else(|| {
                    tracing::warn!("Rejected session cookie with bad signature");
                    SessionId::new()
                }),
                None => SessionId::new(),
            };
            req.extensions_mut().insert(session);

            let mut resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {})
                .into_response();

            if let Ok(value) = HeaderValue::from_str(&config.set_cookie_header(session)) {
                resp.headers_mut().append(http::header::SET_COOKIE, value);
            }
            Ok(resp)
        })
    }
}

/// Extract the raw session cookie value from the Cookie header(s).
fn extract_session_cookie(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}
