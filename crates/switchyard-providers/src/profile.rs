//! Provider profile data model

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// Upstream API conventions supported by the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    #[serde(rename = "openrouter")]
    OpenRouter,
    CustomAnthropic,
    #[serde(rename = "deepseek")]
    DeepSeek,
    Moonshot,
    Zhipu,
    Baichuan,
    OfficialAnthropic,
    #[serde(rename = "azure_openai")]
    AzureOpenAi,
    Gemini,
    LocalOllama,
}

impl ProviderType {
    /// Every supported provider type, in declaration order
    pub const ALL: [ProviderType; 10] = [
        ProviderType::OpenRouter,
        ProviderType::CustomAnthropic,
        ProviderType::DeepSeek,
        ProviderType::Moonshot,
        ProviderType::Zhipu,
        ProviderType::Baichuan,
        ProviderType::OfficialAnthropic,
        ProviderType::AzureOpenAi,
        ProviderType::Gemini,
        ProviderType::LocalOllama,
    ];

    /// Wire name used in the configuration document
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::OpenRouter => "openrouter",
            ProviderType::CustomAnthropic => "custom_anthropic",
            ProviderType::DeepSeek => "deepseek",
            ProviderType::Moonshot => "moonshot",
            ProviderType::Zhipu => "zhipu",
            ProviderType::Baichuan => "baichuan",
            ProviderType::OfficialAnthropic => "official_anthropic",
            ProviderType::AzureOpenAi => "azure_openai",
            ProviderType::Gemini => "gemini",
            ProviderType::LocalOllama => "local_ollama",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        ProviderType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProviderError::UnknownProviderType(s.to_string()))
    }
}

fn default_priority() -> u32 {
    1
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout_secs() -> f64 {
    30.0
}

/// A named configuration describing one upstream AI endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Unique key within a registry
    pub name: String,
    /// API convention of the endpoint
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub small_fast_model: String,
    /// Extra headers sent with probes and exported to the downstream tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<BTreeMap<String, String>>,
    /// Higher numbers score higher during selection
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Probe timeout in seconds
    #[serde(rename = "timeout", default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

impl ProviderProfile {
    /// Create a profile with default priority, retries and timeout
    pub fn new(
        name: impl Into<String>,
        provider_type: ProviderType,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            name: name.into(),
            provider_type,
            base_url: base_url.into(),
            api_key: api_key.into(),
            small_fast_model: model.clone(),
            model,
            custom_headers: None,
            priority: default_priority(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_small_fast_model(mut self, model: impl Into<String>) -> Self {
        self.small_fast_model = model.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Probe timeout as a duration; non-finite or negative values collapse to zero
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs.is_finite() && self.timeout_secs > 0.0 {
            Duration::from_secs_f64(self.timeout_secs)
        } else {
            Duration::ZERO
        }
    }

    /// Iterate custom headers, empty when none are configured
    pub fn headers(&self) -> impl Iterator<Item = (&String, &String)> {
        self.custom_headers.iter().flat_map(|h| h.iter())
    }

    /// Validate the profile fields
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| ProviderError::InvalidProfile {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.priority == 0 {
            return Err(invalid("priority must be at least 1"));
        }
        if !(self.timeout_secs.is_finite() && self.timeout_secs > 0.0) {
            return Err(invalid("timeout must be a positive number of seconds"));
        }

        // These fields end up in the environment, where NUL cannot be stored
        let exported = [
            ("base_url", &self.base_url),
            ("api_key", &self.api_key),
            ("model", &self.model),
            ("small_fast_model", &self.small_fast_model),
        ];
        if let Some((field, _)) = exported.iter().find(|(_, value)| value.contains('\0')) {
            return Err(invalid(&format!("{} contains a NUL byte", field)));
        }

        for (name, value) in self.headers() {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(invalid(&format!("'{}' is not a valid header name", name)));
            }
            if HeaderValue::from_str(value).is_err() {
                return Err(invalid(&format!("header '{}' has an invalid value", name)));
            }
        }
        Ok(())
    }
}
