//! Switchyard configuration
//!
//! A single JSON document holds the provider profiles, named project
//! directories and launch settings. It is read through the `config` crate so
//! `SWITCHYARD_*` environment variables can override individual settings.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, ENV_PREFIX};
pub use types::{ConfigDocument, ProjectDirectory, Settings};
