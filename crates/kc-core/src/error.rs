//! Error handling for the Keycloak adapter subsystem.
//!
//! Error messages are diagnostic strings intended for the host's
//! operation-failure reporting.

use thiserror::Error;

/// Result type alias using the core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for configuration and bootstrap failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading a definition file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A definition could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
