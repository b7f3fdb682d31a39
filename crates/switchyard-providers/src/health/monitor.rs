//! Concurrent health checks across all profiles

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::probe::HealthProbe;
use super::{HealthStatus, StatusTable};
use crate::profile::ProviderProfile;

/// Slack added on top of a profile's own timeout before the monitor gives up
/// on a probe that has not returned.
const PROBE_DEADLINE_GRACE: Duration = Duration::from_millis(250);

/// Runs a [`HealthProbe`] against every profile concurrently and publishes the
/// finished batch as one table.
///
/// The latest table is shared behind an async lock. A batch only replaces it
/// once every probe has resolved, so readers never see a mix of old and new
/// entries.
pub struct HealthMonitor {
    probe: Arc<dyn HealthProbe>,
    latest: Arc<RwLock<StatusTable>>,
}

impl HealthMonitor {
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            probe,
            latest: Arc::new(RwLock::new(StatusTable::new())),
        }
    }

    /// Reset the published table to one unchecked entry per profile
    pub async fn seed(&self, profiles: &[ProviderProfile]) {
        let table: StatusTable = profiles
            .iter()
            .map(|p| HealthStatus::unchecked(&p.name))
            .collect();
        *self.latest.write().await = table;
    }

    /// Snapshot of the last published table
    pub async fn latest(&self) -> StatusTable {
        self.latest.read().await.clone()
    }

    /// Probe every profile concurrently and return the complete table.
    ///
    /// Each probe runs as its own task bounded by the profile's timeout. A task
    /// that panics, is cancelled or overruns its deadline is recorded as an
    /// unhealthy entry instead of being dropped.
    pub async fn check_all(&self, profiles: &[ProviderProfile]) -> StatusTable {
        debug!(count = profiles.len(), "Starting health check batch");
        let started = Instant::now();

        let handles: Vec<_> = profiles
            .iter()
            .cloned()
            .map(|profile| {
                let probe = Arc::clone(&self.probe);
                let name = profile.name.clone();
                let handle = tokio::spawn(async move { run_probe(probe, profile).await });
                (name, handle)
            })
            .collect();

        let (names, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let results = join_all(handles).await;

        let table: StatusTable = names
            .into_iter()
            .zip(results)
            .map(|(name, result)| match result {
                Ok(mut status) => {
                    status.provider_name = name;
                    status
                }
                Err(e) => {
                    warn!(provider = %name, error = %e, "Health probe task failed");
                    HealthStatus::unhealthy(
                        name,
                        f64::INFINITY,
                        format!("Health probe task failed: {}", e),
                    )
                }
            })
            .collect();

        info!(
            total = table.len(),
            healthy = table.healthy_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Health check batch complete"
        );

        *self.latest.write().await = table.clone();
        table
    }
}

async fn run_probe(probe: Arc<dyn HealthProbe>, profile: ProviderProfile) -> HealthStatus {
    let started = Instant::now();
    let deadline = profile.timeout() + PROBE_DEADLINE_GRACE;

    match tokio::time::timeout(deadline, probe.probe(&profile)).await {
        Ok(status) => status,
        Err(_) => {
            warn!(provider = %profile.name, "Health probe overran its deadline");
            HealthStatus::unhealthy(
                &profile.name,
                started.elapsed().as_secs_f64(),
                format!("Health check timeout after {:.1}s", profile.timeout_secs),
            )
        }
    }
}
