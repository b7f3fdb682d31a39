//! Error types for provider activation

use switchyard_providers::ProviderError;
use thiserror::Error;

/// Activation errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ActivationError {
    /// No profile with this name is registered; the environment was not touched
    #[error("Provider not found: {0}")]
    NotFound(String),

    /// Another activation is still being applied
    #[error("Another provider activation is in progress")]
    InProgress,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type for activation operations
pub type Result<T> = std::result::Result<T, ActivationError>;
