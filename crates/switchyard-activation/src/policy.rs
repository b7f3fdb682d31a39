//! Environment variable policy per provider type

use std::collections::BTreeMap;

use switchyard_providers::{ProviderProfile, ProviderType};

/// Namespace shared by every variable the downstream tool reads
pub const ENV_PREFIX: &str = "ANTHROPIC_";

pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const AUTH_TOKEN_VAR: &str = "ANTHROPIC_AUTH_TOKEN";
pub const MODEL_VAR: &str = "ANTHROPIC_MODEL";
pub const SMALL_FAST_MODEL_VAR: &str = "ANTHROPIC_SMALL_FAST_MODEL";

/// Prefix of variables synthesized from custom headers
pub const CUSTOM_HEADER_PREFIX: &str = "ANTHROPIC_CUSTOM_HEADERS_";

/// Model value meaning "let the endpoint pick"
pub const AUTO_MODEL: &str = "auto";

/// Fixed set cleared before every activation, whoever set it
pub const MANAGED_VARS: [&str; 5] = [
    API_KEY_VAR,
    AUTH_TOKEN_VAR,
    MODEL_VAR,
    SMALL_FAST_MODEL_VAR,
    BASE_URL_VAR,
];

/// Which variable carries the credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialVar {
    ApiKey,
    AuthToken,
}

impl CredentialVar {
    pub fn name(&self) -> &'static str {
        match self {
            CredentialVar::ApiKey => API_KEY_VAR,
            CredentialVar::AuthToken => AUTH_TOKEN_VAR,
        }
    }
}

/// When the model variables are exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPolicy {
    Always,
    /// Only when the model is set and is not [`AUTO_MODEL`]
    UnlessAuto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationPolicy {
    pub credential: CredentialVar,
    pub models: ModelPolicy,
}

/// Policy for types without an entry in [`POLICY_TABLE`]
pub const DEFAULT_POLICY: ActivationPolicy = ActivationPolicy {
    credential: CredentialVar::ApiKey,
    models: ModelPolicy::Always,
};

/// Provider types whose variables differ from [`DEFAULT_POLICY`]
pub static POLICY_TABLE: [(ProviderType, ActivationPolicy); 3] = [
    (
        ProviderType::OpenRouter,
        ActivationPolicy {
            credential: CredentialVar::ApiKey,
            models: ModelPolicy::Always,
        },
    ),
    (
        ProviderType::CustomAnthropic,
        ActivationPolicy {
            credential: CredentialVar::AuthToken,
            models: ModelPolicy::UnlessAuto,
        },
    ),
    (
        ProviderType::Moonshot,
        ActivationPolicy {
            credential: CredentialVar::ApiKey,
            models: ModelPolicy::UnlessAuto,
        },
    ),
];

impl ActivationPolicy {
    pub fn for_type(provider_type: ProviderType) -> ActivationPolicy {
        POLICY_TABLE
            .iter()
            .find(|(t, _)| *t == provider_type)
            .map(|(_, policy)| *policy)
            .unwrap_or(DEFAULT_POLICY)
    }

    fn exports_models(&self, model: &str) -> bool {
        match self.models {
            ModelPolicy::Always => true,
            ModelPolicy::UnlessAuto => !model.is_empty() && model != AUTO_MODEL,
        }
    }
}

/// Variable name for a custom header: `x-api-key` becomes
/// `ANTHROPIC_CUSTOM_HEADERS_X_API_KEY`
pub fn custom_header_var(header: &str) -> String {
    format!("{}{}", CUSTOM_HEADER_PREFIX, header.replace('-', "_").to_uppercase())
}

/// Full variable mapping for a profile
pub fn env_vars_for(profile: &ProviderProfile) -> BTreeMap<String, String> {
    let policy = ActivationPolicy::for_type(profile.provider_type);
    let mut vars = BTreeMap::new();

    vars.insert(BASE_URL_VAR.to_string(), profile.base_url.clone());
    vars.insert(policy.credential.name().to_string(), profile.api_key.clone());

    if policy.exports_models(&profile.model) {
        vars.insert(MODEL_VAR.to_string(), profile.model.clone());
        vars.insert(
            SMALL_FAST_MODEL_VAR.to_string(),
            profile.small_fast_model.clone(),
        );
    }

    for (name, value) in profile.headers() {
        vars.insert(custom_header_var(name), value.clone());
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(provider_type: ProviderType, model: &str) -> ProviderProfile {
        ProviderProfile::new("p", provider_type, "https://example.com", "secret", model)
            .with_small_fast_model("small")
    }

    #[test]
    fn test_custom_header_var_name() {
        assert_eq!(custom_header_var("x-api-key"), "ANTHROPIC_CUSTOM_HEADERS_X_API_KEY");
        assert_eq!(custom_header_var("Trace"), "ANTHROPIC_CUSTOM_HEADERS_TRACE");
    }

    #[test]
    fn test_openrouter_always_exports_models() {
        let vars = env_vars_for(&profile(ProviderType::OpenRouter, AUTO_MODEL));
        assert_eq!(vars[API_KEY_VAR], "secret");
        assert_eq!(vars[MODEL_VAR], "auto");
        assert_eq!(vars[SMALL_FAST_MODEL_VAR], "small");
        assert!(!vars.contains_key(AUTH_TOKEN_VAR));
    }

    #[test]
    fn test_auth_token_proxy_skips_auto_model() {
        let vars = env_vars_for(&profile(ProviderType::CustomAnthropic, AUTO_MODEL));
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[BASE_URL_VAR], "https://example.com");
        assert_eq!(vars[AUTH_TOKEN_VAR], "secret");

        let vars = env_vars_for(&profile(ProviderType::CustomAnthropic, "claude-x"));
        assert_eq!(vars[MODEL_VAR], "claude-x");
        assert_eq!(vars[SMALL_FAST_MODEL_VAR], "small");
        assert!(!vars.contains_key(API_KEY_VAR));
    }

    #[test]
    fn test_auth_token_proxy_skips_empty_model() {
        let vars = env_vars_for(&profile(ProviderType::CustomAnthropic, ""));
        assert!(!vars.contains_key(MODEL_VAR));
    }

    #[test]
    fn test_moonshot_uses_api_key_and_optional_model() {
        let vars = env_vars_for(&profile(ProviderType::Moonshot, AUTO_MODEL));
        assert_eq!(vars[API_KEY_VAR], "secret");
        assert!(!vars.contains_key(MODEL_VAR));

        let vars = env_vars_for(&profile(ProviderType::Moonshot, "moonshot-v1-8k"));
        assert_eq!(vars[MODEL_VAR], "moonshot-v1-8k");
    }

    #[test]
    fn test_other_types_fall_back_to_default() {
        for t in [
            ProviderType::DeepSeek,
            ProviderType::Zhipu,
            ProviderType::Baichuan,
            ProviderType::OfficialAnthropic,
            ProviderType::AzureOpenAi,
            ProviderType::Gemini,
            ProviderType::LocalOllama,
        ] {
            assert_eq!(ActivationPolicy::for_type(t), DEFAULT_POLICY);
            let vars = env_vars_for(&profile(t, "m"));
            assert_eq!(vars[API_KEY_VAR], "secret");
            assert_eq!(vars[MODEL_VAR], "m");
        }
    }

    #[test]
    fn test_custom_headers_exported() {
        let p = profile(ProviderType::DeepSeek, "m").with_header("x-api-key", "abc");
        let vars = env_vars_for(&p);
        assert_eq!(vars["ANTHROPIC_CUSTOM_HEADERS_X_API_KEY"], "abc");
    }
}
