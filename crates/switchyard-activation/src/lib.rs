//! Switchyard activation - materializes a provider profile as environment state
//!
//! Activating a profile clears every variable a previous activation (or the
//! user's shell) left in the `ANTHROPIC_` namespace, exports the variables the
//! profile's provider type calls for, and optionally writes a shell transcript
//! of the result.

pub mod env;
pub mod error;
pub mod policy;
pub mod transcript;
pub mod translator;

pub use env::{EnvironmentSink, InMemoryEnvironment, ProcessEnvironment};
pub use error::{ActivationError, Result};
pub use policy::{
    custom_header_var, env_vars_for, ActivationPolicy, CredentialVar, ModelPolicy, API_KEY_VAR,
    AUTH_TOKEN_VAR, BASE_URL_VAR, ENV_PREFIX, MANAGED_VARS, MODEL_VAR, SMALL_FAST_MODEL_VAR,
};
pub use transcript::{TranscriptWriter, DEFAULT_TRANSCRIPT_FILE};
pub use translator::{ActivationResult, ActivationTranslator};
