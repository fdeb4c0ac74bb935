//! Application state, router assembly, and the HTTP server loop.

use std::sync::Arc;

use axum::ServiceExt;
use axum::Router;
use axum::extract::Request;
use axum::routing::get;
use contactbook_core::ContactStore;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::flash::FlashChannel;
use crate::handlers;
use crate::method_override::{MethodOverride, MethodOverrideLayer};
use crate::session::{SessionConfig, SessionLayer};
use crate::views::{HtmlRenderer, Renderer};
use crate::Result;

/// Shared dependencies of every handler.
#[derive(Clone)]
pub struct AppState {
    /// Contact persistence.
    pub store: Arc<dyn ContactStore>,
    /// Pending one-shot messages.
    pub flash: Arc<FlashChannel>,
    /// View renderer.
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// State with the built-in [`HtmlRenderer`].
    pub fn new(store: Arc<dyn ContactStore>, flash: FlashChannel) -> Self {
        Self::with_renderer(store, flash, Arc::new(HtmlRenderer))
    }

    /// State with a custom renderer.
    pub fn with_renderer(
        store: Arc<dyn ContactStore>,
        flash: FlashChannel,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            store,
            flash: Arc::new(flash),
            renderer,
        }
    }
}

/// Routes of the application, with sessions and request tracing applied.
pub fn build_router(state: AppState, session: SessionConfig) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route(
            "/contact",
            get(handlers::list_contacts)
                .post(handlers::create_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .route("/contact/add", get(handlers::add_contact_form))
        .route("/contact/edit/{name}", get(handlers::edit_contact_form))
        .route("/contact/{name}", get(handlers::contact_detail))
        .fallback(handlers::not_found)
        .layer(SessionLayer::new(session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The complete service: method override in front of the router.
///
/// Overrides must be applied before routing, so the layer wraps the router
/// instead of being attached with `Router::layer`.
pub fn app(state: AppState, session: SessionConfig) -> MethodOverride<Router> {
    MethodOverrideLayer.layer(build_router(state, session))
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config, store: Arc<dyn ContactStore>) -> Result<()> {
    let session = SessionConfig::new(&config.session.secret, config.session_max_age());
    let state = AppState::new(store, FlashChannel::new(session.max_age()));
    let service = app(state, session);

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "Contactbook listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Contactbook stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
