//! Single-profile reachability check

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use super::rules::{classify_status, AuthScheme, ProbeRule, StatusClass};
use super::HealthStatus;
use crate::profile::ProviderProfile;

/// Performs one reachability check against one profile.
///
/// Implementations never fail: transport errors, timeouts and unexpected
/// statuses are all reported through the returned [`HealthStatus`].
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, profile: &ProviderProfile) -> HealthStatus;
}

/// Probe issuing a single HTTP GET per check
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: reqwest::Client,
}

impl HttpHealthProbe {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (proxy settings, TLS roots)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build_request(
        &self,
        profile: &ProviderProfile,
    ) -> Result<reqwest::RequestBuilder, String> {
        let rule = ProbeRule::for_type(profile.provider_type);
        let url = rule.url_for(profile);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in profile.headers() {
            insert_header(&mut headers, name, value)?;
        }
        for (name, value) in rule.extra_headers {
            insert_header(&mut headers, name, value)?;
        }

        let mut request = self.client.get(&url).timeout(profile.timeout());
        match rule.auth {
            AuthScheme::Bearer => {
                let value = format!("Bearer {}", profile.api_key);
                let value = HeaderValue::from_str(&value)
                    .map_err(|_| "API key is not a valid header value".to_string())?;
                headers.insert(AUTHORIZATION, value);
            }
            AuthScheme::Header(name) => insert_header(&mut headers, name, &profile.api_key)?,
            AuthScheme::Query(param) => {
                request = request.query(&[(param, profile.api_key.as_str())]);
            }
            AuthScheme::None => {}
        }

        debug!(provider = %profile.name, url = %url, "Built health probe request");
        Ok(request.headers(headers))
    }
}

impl Default for HttpHealthProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), String> {
    let header = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| format!("Invalid header name: {}", name))?;
    let value = HeaderValue::from_str(value)
        .map_err(|_| format!("Invalid value for header {}", name))?;
    headers.insert(header, value);
    Ok(())
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, profile: &ProviderProfile) -> HealthStatus {
        let started = Instant::now();

        let request = match self.build_request(profile) {
            Ok(request) => request,
            Err(e) => {
                warn!(provider = %profile.name, error = %e, "Health probe request invalid");
                return HealthStatus::unhealthy(
                    &profile.name,
                    started.elapsed().as_secs_f64(),
                    e,
                );
            }
        };

        let result = request.send().await;
        let elapsed = started.elapsed().as_secs_f64();

        match result {
            Ok(response) => {
                let code = response.status().as_u16();
                debug!(
                    provider = %profile.name,
                    status = code,
                    elapsed_ms = (elapsed * 1000.0) as u64,
                    "Health probe answered"
                );
                match classify_status(code) {
                    StatusClass::Healthy => HealthStatus::healthy(&profile.name, elapsed),
                    StatusClass::Unhealthy => {
                        HealthStatus::unhealthy(&profile.name, elapsed, format!("HTTP {}", code))
                    }
                }
            }
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("Health check timeout after {:.1}s", profile.timeout_secs)
                } else {
                    e.to_string()
                };
                warn!(provider = %profile.name, error = %message, "Health probe failed");
                HealthStatus::unhealthy(&profile.name, elapsed, message)
            }
        }
    }
}
