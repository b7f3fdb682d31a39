//! Health probing of provider endpoints
//!
//! A [`HealthProbe`] performs one bounded-time reachability check against a
//! profile and reports the outcome as a [`HealthStatus`]. The
//! [`HealthMonitor`] fans probes out over every profile concurrently and
//! publishes the finished batch as a single [`StatusTable`].

pub mod monitor;
pub mod probe;
pub mod rules;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use monitor::HealthMonitor;
pub use probe::{HealthProbe, HttpHealthProbe};
pub use rules::{classify_status, AuthScheme, ProbeRule, StatusClass, HEALTHY_STATUS_CODES};

/// Point-in-time reachability of one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub provider_name: String,
    pub is_healthy: bool,
    /// Wall-clock seconds of the last probe; infinite when never measured
    pub response_time_secs: f64,
    /// When the last probe finished; `None` until the first check
    pub last_check: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl HealthStatus {
    /// Status of a provider that has not been probed yet
    pub fn unchecked(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            is_healthy: false,
            response_time_secs: f64::INFINITY,
            last_check: None,
            error_message: None,
        }
    }

    pub fn healthy(provider_name: impl Into<String>, response_time_secs: f64) -> Self {
        Self {
            provider_name: provider_name.into(),
            is_healthy: true,
            response_time_secs,
            last_check: Some(Utc::now()),
            error_message: None,
        }
    }

    pub fn unhealthy(
        provider_name: impl Into<String>,
        response_time_secs: f64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            is_healthy: false,
            response_time_secs,
            last_check: Some(Utc::now()),
            error_message: Some(error.into()),
        }
    }

    /// Whether a latency has ever been measured
    pub fn is_measured(&self) -> bool {
        self.response_time_secs.is_finite()
    }
}

/// Health statuses keyed by provider name, produced by one monitor batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusTable {
    statuses: HashMap<String, HealthStatus>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, status: HealthStatus) {
        self.statuses.insert(status.provider_name.clone(), status);
    }

    pub fn get(&self, provider_name: &str) -> Option<&HealthStatus> {
        self.statuses.get(provider_name)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Number of healthy entries
    pub fn healthy_count(&self) -> usize {
        self.statuses.values().filter(|s| s.is_healthy).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HealthStatus> {
        self.statuses.values()
    }
}

impl FromIterator<HealthStatus> for StatusTable {
    fn from_iter<I: IntoIterator<Item = HealthStatus>>(iter: I) -> Self {
        let mut table = StatusTable::new();
        for status in iter {
            table.insert(status);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchecked_status() {
        let status = HealthStatus::unchecked("a");
        assert!(!status.is_healthy);
        assert!(status.response_time_secs.is_infinite());
        assert!(status.last_check.is_none());
        assert!(!status.is_measured());
    }

    #[test]
    fn test_table_keeps_latest_status_per_provider() {
        let mut table = StatusTable::new();
        table.insert(HealthStatus::unchecked("a"));
        table.insert(HealthStatus::healthy("a", 0.5));
        assert_eq!(table.len(), 1);
        assert!(table.get("a").unwrap().is_healthy);
        assert_eq!(table.healthy_count(), 1);
    }
}
