//! Error types for contactbook-web

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Plain-text body sent with every 500 response.
pub const SERVER_ERROR_MESSAGE: &str = "An error occurred while processing the contact data.";

/// Result type alias for contactbook-web operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in contactbook-web
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from contactbook-core (storage, configuration)
    #[error("Core error: {0}")]
    Core(#[from] contactbook_core::Error),

    /// A view could not be rendered
    #[error("Render error: {message}")]
    Render {
        /// What went wrong
        message: String,
    },

    /// I/O error (binding the listener, serving connections)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new render error.
    pub fn render<S: Into<String>>(message: S) -> Self {
        Error::Render {
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
    }
}
