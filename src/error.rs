//! # Error Types
//!
//! Domain errors for the contact handler and its collaborators.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactApiError {
    /// The request payload could not be read or did not match the expected shape.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The response could not be encoded onto the call.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Simulated background work failed. Only ever logged.
    #[error("Auxiliary failure: {0}")]
    AuxiliaryFailure(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The detached task group no longer accepts work.
    #[error("Shutting down: {0}")]
    ShuttingDown(String),
}

impl ContactApiError {
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Whether the error stems from the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Deserialization(_))
    }
}

impl From<serde_json::Error> for ContactApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}

impl From<config::ConfigError> for ContactApiError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ContactApiError>;
