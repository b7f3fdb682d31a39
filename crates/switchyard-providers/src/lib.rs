//! Switchyard providers - profiles, health monitoring and selection
//!
//! This crate owns the provider profile model and the engine that decides
//! which provider to use: every profile is probed concurrently, classified as
//! healthy or not, and the healthy ones are ranked by priority and latency.

pub mod error;
pub mod health;
pub mod profile;
pub mod registry;
pub mod selection;

// Re-export commonly used types
pub use error::{ProviderError, Result};
pub use health::{
    classify_status, HealthMonitor, HealthProbe, HealthStatus, HttpHealthProbe, ProbeRule,
    StatusClass, StatusTable, HEALTHY_STATUS_CODES,
};
pub use profile::{ProviderProfile, ProviderType};
pub use registry::ProviderRegistry;
pub use selection::{best, rank, score};
