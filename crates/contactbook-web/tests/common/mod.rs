//! Common test utilities and harness for contactbook-web integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use contactbook_core::{ContactFields, ContactStore};
use contactbook_storage::MemoryStore;
use contactbook_web::views::encode_segment;
use contactbook_web::{AppState, FlashChannel, MethodOverride, SessionConfig, app};
use http::{Request, StatusCode, header};
use tower::ServiceExt;

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// Test harness for integration tests.
///
/// Acts like a single browser: the session cookie from each response is sent
/// with the next request.
pub struct TestApp {
    pub store: Arc<dyn ContactStore>,
    service: MethodOverride<Router>,
    cookie: Option<String>,
}

impl TestApp {
    /// Creates an app over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Creates an app over `store`.
    pub fn with_store(store: Arc<dyn ContactStore>) -> Self {
        let session = test_session_config();
        let state = AppState::new(store.clone(), FlashChannel::new(session.max_age()));
        Self {
            store,
            service: app(state, session),
            cookie: None,
        }
    }

    /// A second browser on the same server, with its own session.
    pub fn other_browser(&self) -> Self {
        Self {
            store: self.store.clone(),
            service: self.service.clone(),
            cookie: None,
        }
    }

    /// Inserts `Alice` and `Bob` directly into the store.
    pub async fn seed(&self) {
        for fields in [alice(), bob()] {
            self.store.insert(fields).await.unwrap();
        }
    }

    /// The `name=value` pair of the current session cookie.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let req = Request::get(path).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn submit(&mut self, method: &str, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body(fields)))
            .unwrap();
        self.send(req).await
    }

    pub async fn send(&mut self, mut req: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            req.headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let resp = self.service.clone().oneshot(req).await.unwrap();

        if let Some(set_cookie) = resp.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn names(&self) -> Vec<String> {
        self.store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_session_config() -> SessionConfig {
    SessionConfig::new("integration-secret", Duration::from_secs(60))
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode_segment(k), encode_segment(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn alice() -> ContactFields {
    ContactFields::new("Alice", "081234567890", "a@x.com")
}

pub fn bob() -> ContactFields {
    ContactFields::new("Bob", "081298765432", "b@x.com")
}
