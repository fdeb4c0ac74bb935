//! Error types for contactbook-core.

/// Errors that can occur while reading or writing contacts.
///
/// Validation failures are not errors: they are collected in
/// [`ValidationErrors`](crate::ValidationErrors) and shown on the form.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Backend storage failure (I/O, transaction, corrupt document, etc.)
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A write would give two contacts the same name
    #[error("Contact name already registered: {name}")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for contactbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was caused by the submitted data rather than the
    /// system serving it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::DuplicateName { .. })
    }

    /// Creates a new storage error with a message.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Error::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new storage error with a message and source error.
    pub fn storage_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new duplicate-name error.
    pub fn duplicate_name<S: Into<String>>(name: S) -> Self {
        Error::DuplicateName { name: name.into() }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
