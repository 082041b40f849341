//! Model gateway configuration from TOML (`[gateway]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Default OpenRouter-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP gateway configuration.
///
/// # Example
///
/// ```toml
/// [gateway]
/// base_url = "https://openrouter.ai/api/v1"
/// api_key_env = "OPENROUTER_API_KEY"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Base URL of the chat-completions API
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENROUTER_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FileGatewayConfig {
    /// Resolve the API key: the environment variable wins over `api_key`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        lookup(&self.api_key_env)
            .or_else(|| self.api_key.clone())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "gateway.timeout_secs cannot be 0",
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidBaseUrl {
                    value: self.base_url.clone(),
                },
                format!("gateway.base_url: '{}' is not an http(s) URL", self.base_url),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_wins_over_inline_key() {
        let config = FileGatewayConfig {
            api_key: Some("inline".to_string()),
            ..Default::default()
        };
        let key = config.resolve_api_key_with(|name| {
            (name == DEFAULT_API_KEY_ENV).then(|| "from-env".to_string())
        });
        assert_eq!(key, Some("from-env".to_string()));
    }

    #[test]
    fn test_inline_key_used_when_env_missing() {
        let config = FileGatewayConfig {
            api_key: Some(" inline ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key_with(|_| None), Some("inline".to_string()));
    }

    #[test]
    fn test_blank_key_is_none() {
        let config = FileGatewayConfig::default();
        assert_eq!(config.resolve_api_key_with(|_| Some("  ".to_string())), None);
    }

    #[test]
    fn test_validate_zero_timeout_and_bad_url() {
        let config = FileGatewayConfig {
            base_url: "openrouter.ai".to_string(),
            timeout_secs: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroTimeout);
    }
}
