//! Error types for the providers module

use thiserror::Error;

/// Errors raised by profile and registry operations.
///
/// Probe failures are never reported through this type; they are recorded
/// as data in a [`crate::HealthStatus`].
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProviderError {
    /// Provider not found by name
    #[error("Provider not found: {0}")]
    NotFound(String),

    /// A profile with the same name is already registered
    #[error("Duplicate provider name: {0}")]
    DuplicateName(String),

    /// Profile failed validation
    #[error("Invalid provider profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    /// An update tried to rename a profile
    #[error("Provider name cannot change from '{from}' to '{to}'")]
    NameChange { from: String, to: String },

    /// Provider type string is not part of the supported set
    #[error("Unknown provider type: {0}")]
    UnknownProviderType(String),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
