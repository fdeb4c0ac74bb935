//! # contactbook-web
//!
//! Server-rendered HTTP front end for Contactbook.
//!
//! This crate provides:
//! - Route handlers for listing, adding, editing, viewing, and deleting contacts
//! - [`SessionLayer`]: signed-cookie sessions as Tower middleware
//! - [`FlashChannel`]: one-shot messages carried across a redirect
//! - [`MethodOverrideLayer`]: `?_method=` rewriting for HTML forms
//! - [`Renderer`]: the view-rendering seam, with a plain [`HtmlRenderer`]
//! - [`Config`]: TOML-backed server configuration

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod method_override;
pub mod server;
pub mod session;
pub mod views;

pub use config::Config;
pub use error::{Error, Result};
pub use flash::FlashChannel;
pub use method_override::{MethodOverride, MethodOverrideLayer};
pub use server::{AppState, app, build_router, serve};
pub use session::{SessionConfig, SessionId, SessionLayer, SessionService};
pub use views::{HtmlRenderer, Page, Renderer, View};
