use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Shipped in `.env.example`; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "sk-your-api-key-here";

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Nothing is required: without an API key the service runs rule-based only.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmConfig,
}

/// Settings for the AI extraction strategy.
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    /// Per-request deadline; also bounds the whole AI attempt.
    pub timeout: Duration,
    pub base_url: String,
}

impl LlmConfig {
    /// The API key, unless it is absent, blank or the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Unset or blank values take
    /// their defaults; values that are set but malformed are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_ms: u64 = parse_or(get("OPENAI_TIMEOUT"), "OPENAI_TIMEOUT", 30_000)?;

        Ok(Config {
            port: parse_or(get("PORT"), "PORT", 8080)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm: LlmConfig {
                api_key: get("OPENAI_API_KEY"),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: parse_or(get("OPENAI_MAX_TOKENS"), "OPENAI_MAX_TOKENS", 1000)?,
                timeout: Duration::from_millis(timeout_ms),
                base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.max_tokens, 1000);
        assert_eq!(config.llm.timeout, Duration::from_millis(30_000));
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.usable_api_key(), None);
    }

    #[test]
    fn test_overrides_are_read() {
        let config = load(&[
            ("PORT", "3000"),
            ("OPENAI_API_KEY", "sk-live"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_MAX_TOKENS", "2000"),
            ("OPENAI_TIMEOUT", "5000"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.llm.usable_api_key(), Some("sk-live"));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.llm.timeout, Duration::from_secs(5));
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn test_placeholder_and_blank_keys_are_unconfigured() {
        for key in [PLACEHOLDER_API_KEY, "   ", " sk-your-api-key-here "] {
            let config = load(&[("OPENAI_API_KEY", key)]).unwrap();
            assert_eq!(config.llm.usable_api_key(), None, "{key:?}");
        }
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(load(&[("OPENAI_TIMEOUT", "-1")]).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = load(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
