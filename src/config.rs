//! Client configuration
//!
//! `ClientConfig` is validated once, when it is built, and never changes
//! afterwards. It can be assembled in code through [`ClientConfigBuilder`],
//! or loaded from YAML or the process environment through [`ClientSettings`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Production endpoint of the affiliate API
pub const DEFAULT_BASE_URL: &str = "https://api.dmm.com/affiliate/v3";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

// ============================================================================
// Client Config
// ============================================================================

/// Validated, immutable client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_id: String,
    affiliate_id: String,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Create a config with default settings
    pub fn new(api_id: impl Into<String>, affiliate_id: impl Into<String>) -> Result<Self> {
        Self::builder(api_id, affiliate_id).build()
    }

    /// Create a new config builder
    pub fn builder(
        api_id: impl Into<String>,
        affiliate_id: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_id: api_id.into(),
            affiliate_id: affiliate_id.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent: default_user_agent(),
        }
    }

    /// Load a config from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: ClientSettings = serde_yaml::from_str(yaml)?;
        settings.into_config()
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load a config from `DMM_*` environment variables
    pub fn from_env() -> Result<Self> {
        ClientSettings::from_env()?.into_config()
    }

    /// API id sent with every request
    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    /// Affiliate id sent with every request
    pub fn affiliate_id(&self) -> &str {
        &self.affiliate_id
    }

    /// Base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Deadline for one request attempt
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries allowed after the first attempt
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Base delay for exponential backoff
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// User agent header value
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_id", &"<redacted>")
            .field("affiliate_id", &self.affiliate_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("dmm-affiliate/{}", env!("CARGO_PKG_VERSION"))
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    api_id: String,
    affiliate_id: String,
    base_url: Option<String>,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    user_agent: String,
}

impl ClientConfigBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set max retries
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base backoff delay
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        let api_id = require_non_empty("api_id", self.api_id)?;
        let affiliate_id = require_non_empty("affiliate_id", self.affiliate_id)?;

        let base_url = match self.base_url {
            Some(url) => normalize_base_url(&url)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        if self.timeout.is_zero() {
            return Err(Error::invalid_value("timeout", "must be greater than zero"));
        }
        if self.retry_delay.is_zero() {
            return Err(Error::invalid_value(
                "retry_delay",
                "must be greater than zero",
            ));
        }

        Ok(ClientConfig {
            api_id,
            affiliate_id,
            base_url,
            timeout: self.timeout,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
            user_agent: self.user_agent,
        })
    }
}

fn require_non_empty(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::missing_field(field));
    }
    Ok(trimmed.to_string())
}

/// Parse a base URL, require http(s) and strip trailing slashes
fn normalize_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid_value("base_url", "must not be empty"));
    }

    let url = Url::parse(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_value(
            "base_url",
            format!("unsupported scheme '{}', expected http or https", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(Error::invalid_value("base_url", "missing host"));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

// ============================================================================
// Serialized Settings
// ============================================================================

/// Unvalidated settings as they appear in YAML files or the environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// API id
    #[serde(default)]
    pub api_id: Option<String>,
    /// Affiliate id
    #[serde(default)]
    pub affiliate_id: Option<String>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Maximum number of retries
    #[serde(default)]
    pub max_retries: Option<u32>,
    /// Base backoff delay in milliseconds
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,
}

impl ClientSettings {
    /// Read settings from `DMM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_id: lookup("DMM_API_ID"),
            affiliate_id: lookup("DMM_AFFILIATE_ID"),
            base_url: lookup("DMM_BASE_URL"),
            timeout_ms: parse_var(&lookup, "DMM_TIMEOUT_MS")?,
            max_retries: parse_var(&lookup, "DMM_MAX_RETRIES")?,
            retry_delay_ms: parse_var(&lookup, "DMM_RETRY_DELAY_MS")?,
        })
    }

    /// Validate into a [`ClientConfig`]
    pub fn into_config(self) -> Result<ClientConfig> {
        let api_id = self.api_id.ok_or_else(|| Error::missing_field("api_id"))?;
        let affiliate_id = self
            .affiliate_id
            .ok_or_else(|| Error::missing_field("affiliate_id"))?;

        let mut builder = ClientConfig::builder(api_id, affiliate_id);
        if let Some(url) = self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(retries) = self.max_retries {
            builder = builder.max_retries(retries);
        }
        if let Some(ms) = self.retry_delay_ms {
            builder = builder.retry_delay(Duration::from_millis(ms));
        }
        builder.build()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::invalid_value(key, format!("{e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("api", "aff-990").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries(), 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(1));
        assert!(config.user_agent().starts_with("dmm-affiliate/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder("api", "aff-990")
            .base_url("http://localhost:8080/v3///")
            .timeout(Duration::from_millis(250))
            .max_retries(0)
            .retry_delay(Duration::from_millis(5))
            .user_agent("test-agent/1.0")
            .build()
            .unwrap();

        assert_eq!(config.base_url(), "http://localhost:8080/v3");
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.max_retries(), 0);
        assert_eq!(config.retry_delay(), Duration::from_millis(5));
        assert_eq!(config.user_agent(), "test-agent/1.0");
    }

    #[test]
    fn test_missing_credentials() {
        let err = ClientConfig::new("", "aff-990").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_id"));

        let err = ClientConfig::new("api", "   ").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "affiliate_id"));
    }

    #[test]
    fn test_invalid_base_urls() {
        for bad in ["", "not a url", "ftp://api.example.com", "file:///tmp/api"] {
            let err = ClientConfig::builder("api", "aff-990")
                .base_url(bad)
                .build()
                .unwrap_err();
            assert!(err.is_config(), "{bad:?} should be rejected, got {err}");
        }
    }

    #[test]
    fn test_zero_durations_rejected() {
        let err = ClientConfig::builder("api", "aff-990")
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "timeout"));

        let err = ClientConfig::builder("api", "aff-990")
            .retry_delay(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "retry_delay")
        );
    }

    #[test]
    fn test_debug_redacts_api_id() {
        let config = ClientConfig::new("very-secret", "aff-990").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("aff-990"));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r"
api_id: abc
affiliate_id: aff-990
base_url: https://api.example.com/affiliate/v3/
timeout_ms: 2500
max_retries: 1
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.api_id(), "abc");
        assert_eq!(config.base_url(), "https://api.example.com/affiliate/v3");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.max_retries(), 1);
        assert_eq!(config.retry_delay(), DEFAULT_RETRY_DELAY);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_id: abc\naffiliate_id: aff-990").unwrap();

        let config = ClientConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.affiliate_id(), "aff-990");
    }

    #[test]
    fn test_yaml_missing_credentials() {
        let err = ClientConfig::from_yaml_str("api_id: abc").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "affiliate_id"));
    }

    #[test]
    fn test_settings_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("DMM_API_ID", "abc"),
            ("DMM_AFFILIATE_ID", "aff-990"),
            ("DMM_TIMEOUT_MS", "1500"),
            ("DMM_RETRY_DELAY_MS", "20"),
        ]
        .into_iter()
        .collect();

        let settings = ClientSettings::from_lookup(|k| vars.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(settings.timeout_ms, Some(1500));
        assert_eq!(settings.max_retries, None);

        let config = settings.into_config().unwrap();
        assert_eq!(config.retry_delay(), Duration::from_millis(20));
    }

    #[test]
    fn test_settings_bad_number() {
        let err = ClientSettings::from_lookup(|k| {
            (k == "DMM_MAX_RETRIES").then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "DMM_MAX_RETRIES")
        );
    }
}
