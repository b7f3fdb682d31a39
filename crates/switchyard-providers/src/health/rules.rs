//! Probe rules per provider type and response classification

use crate::profile::{ProviderProfile, ProviderType};

/// HTTP statuses that count as "the endpoint exists and answered".
///
/// Auth and path mismatches (401/403/404) are reported healthy so that a
/// probe path that does not match the vendor's API does not mark a live
/// endpoint as down.
pub const HEALTHY_STATUS_CODES: [u16; 4] = [200, 401, 403, 404];

/// Fixed models endpoint of the official API
pub const OFFICIAL_MODELS_URL: &str = "https://api.anthropic.com/v1/models";

const OPENROUTER_REFERER: &str = "https://claude.ai";

/// Outcome class of an HTTP response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Healthy,
    Unhealthy,
}

/// Classify a response status code
pub fn classify_status(code: u16) -> StatusClass {
    if HEALTHY_STATUS_CODES.contains(&code) {
        StatusClass::Healthy
    } else {
        StatusClass::Unhealthy
    }
}

/// How the probe URL is derived from the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRule {
    /// The base URL itself
    Base,
    /// Base URL followed by a path (and optional query)
    Append(&'static str),
    /// A well-known URL independent of the profile
    Fixed(&'static str),
}

/// How the API key is attached to the probe request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// Vendor header carrying the raw key
    Header(&'static str),
    /// Query-string parameter carrying the raw key
    Query(&'static str),
    /// Local providers need no credentials
    None,
}

/// Probe recipe for one provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRule {
    pub url: UrlRule,
    pub auth: AuthScheme,
    pub extra_headers: &'static [(&'static str, &'static str)],
}

const fn rule(url: UrlRule, auth: AuthScheme) -> ProbeRule {
    ProbeRule {
        url,
        auth,
        extra_headers: &[],
    }
}

static PROBE_RULES: [(ProviderType, ProbeRule); 10] = [
    (
        ProviderType::OpenRouter,
        ProbeRule {
            url: UrlRule::Base,
            auth: AuthScheme::Bearer,
            extra_headers: &[("HTTP-Referer", OPENROUTER_REFERER)],
        },
    ),
    (
        ProviderType::CustomAnthropic,
        rule(UrlRule::Base, AuthScheme::Header("x-api-key")),
    ),
    (
        ProviderType::DeepSeek,
        rule(UrlRule::Append("/models"), AuthScheme::Bearer),
    ),
    (ProviderType::Moonshot, rule(UrlRule::Base, AuthScheme::Bearer)),
    (
        ProviderType::Zhipu,
        rule(UrlRule::Append("/models"), AuthScheme::Bearer),
    ),
    (
        ProviderType::Baichuan,
        rule(UrlRule::Append("/models"), AuthScheme::Bearer),
    ),
    (
        ProviderType::OfficialAnthropic,
        rule(
            UrlRule::Fixed(OFFICIAL_MODELS_URL),
            AuthScheme::Header("x-api-key"),
        ),
    ),
    (
        ProviderType::AzureOpenAi,
        rule(
            UrlRule::Append("/openai/deployments?api-version=2023-05-15"),
            AuthScheme::Header("api-key"),
        ),
    ),
    (
        ProviderType::Gemini,
        rule(UrlRule::Append("/models"), AuthScheme::Query("key")),
    ),
    (
        ProviderType::LocalOllama,
        rule(UrlRule::Append("/api/tags"), AuthScheme::None),
    ),
];

impl ProbeRule {
    /// Look up the rule for a provider type
    pub fn for_type(provider_type: ProviderType) -> &'static ProbeRule {
        PROBE_RULES
            .iter()
            .find(|(t, _)| *t == provider_type)
            .map(|(_, rule)| rule)
            .unwrap_or(&PROBE_RULES[0].1)
    }

    /// Probe URL for a profile
    pub fn url_for(&self, profile: &ProviderProfile) -> String {
        let base = profile.base_url.trim_end_matches('/');
        match self.url {
            UrlRule::Base => base.to_string(),
            UrlRule::Append(path) => format!("{}{}", base, path),
            UrlRule::Fixed(url) => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(provider_type: ProviderType, base_url: &str) -> ProviderProfile {
        ProviderProfile::new("p", provider_type, base_url, "key", "model")
    }

    #[test]
    fn test_classification_table() {
        for code in [200, 401, 403, 404] {
            assert_eq!(classify_status(code), StatusClass::Healthy, "code {}", code);
        }
        for code in [201, 204, 301, 400, 429, 500, 502, 503] {
            assert_eq!(classify_status(code), StatusClass::Unhealthy, "code {}", code);
        }
    }

    #[test]
    fn test_every_type_has_its_own_rule() {
        for t in ProviderType::ALL {
            assert!(PROBE_RULES.iter().any(|(rt, _)| *rt == t), "{} missing", t);
        }
    }

    #[test]
    fn test_urls() {
        let cases = [
            (ProviderType::OpenRouter, "https://or.example/", "https://or.example"),
            (ProviderType::CustomAnthropic, "https://proxy.example/", "https://proxy.example"),
            (
                ProviderType::DeepSeek,
                "https://api.deepseek.com/v1",
                "https://api.deepseek.com/v1/models",
            ),
            (ProviderType::Moonshot, "https://api.moonshot.cn/v1/", "https://api.moonshot.cn/v1"),
            (ProviderType::Zhipu, "https://zp.example/v4", "https://zp.example/v4/models"),
            (ProviderType::Baichuan, "https://bc.example/v1", "https://bc.example/v1/models"),
            (ProviderType::OfficialAnthropic, "https://ignored.example", OFFICIAL_MODELS_URL),
            (
                ProviderType::AzureOpenAi,
                "https://az.example",
                "https://az.example/openai/deployments?api-version=2023-05-15",
            ),
            (ProviderType::Gemini, "https://gm.example/v1beta", "https://gm.example/v1beta/models"),
            (
                ProviderType::LocalOllama,
                "http://localhost:11434",
                "http://localhost:11434/api/tags",
            ),
        ];

        for (t, base, expected) in cases {
            let p = profile(t, base);
            assert_eq!(ProbeRule::for_type(t).url_for(&p), expected, "{}", t);
        }
    }

    #[test]
    fn test_auth_schemes() {
        assert_eq!(ProbeRule::for_type(ProviderType::DeepSeek).auth, AuthScheme::Bearer);
        assert_eq!(
            ProbeRule::for_type(ProviderType::OfficialAnthropic).auth,
            AuthScheme::Header("x-api-key")
        );
        assert_eq!(
            ProbeRule::for_type(ProviderType::AzureOpenAi).auth,
            AuthScheme::Header("api-key")
        );
        assert_eq!(ProbeRule::for_type(ProviderType::Gemini).auth, AuthScheme::Query("key"));
        assert_eq!(ProbeRule::for_type(ProviderType::LocalOllama).auth, AuthScheme::None);
        assert_eq!(
            ProbeRule::for_type(ProviderType::OpenRouter).extra_headers,
            &[("HTTP-Referer", "https://claude.ai")]
        );
    }
}
