//! Best-provider selection by priority and latency

use crate::health::StatusTable;
use crate::profile::ProviderProfile;

/// Latency floor in seconds; keeps near-zero latencies from dominating
pub const MIN_RESPONSE_TIME_SECS: f64 = 0.1;

/// Score of a healthy provider: `priority / max(latency, 0.1)`.
///
/// Higher priority numbers and lower latency both raise the score.
pub fn score(priority: u32, response_time_secs: f64) -> f64 {
    f64::from(priority) / response_time_secs.max(MIN_RESPONSE_TIME_SECS)
}

/// Healthy profiles with their scores, best first.
///
/// Profiles are scanned in the given order and the sort is stable, so equal
/// scores keep that order. Unhealthy profiles and profiles without a status
/// are left out entirely.
pub fn rank(table: &StatusTable, profiles: &[ProviderProfile]) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = profiles
        .iter()
        .filter_map(|profile| {
            let status = table.get(&profile.name)?;
            status
                .is_healthy
                .then(|| (profile.name.clone(), score(profile.priority, status.response_time_secs)))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Name of the best healthy profile, or `None` when nothing is healthy
pub fn best(table: &StatusTable, profiles: &[ProviderProfile]) -> Option<String> {
    rank(table, profiles).into_iter().next().map(|(name, _)| name)
}
