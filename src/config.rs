//! Client configuration
//!
//! `ClientConfig` carries the application credentials plus the transport
//! settings handed to the HTTP dispatcher. It can be built in code or
//! loaded from YAML:
//!
//! ```yaml
//! application_id: 5f1a...
//! api_key: 9c2e...
//! timeout_secs: 10
//! rate_limit:
//!   requests_per_second: 10
//!   burst_size: 10
//! ```

use crate::error::{require, require_key, Error, Result};
use crate::http::RateLimiterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Base URL of the Knack v1 REST API
pub const DEFAULT_API_URL: &str = "https://api.knack.com/v1/";

/// Configuration for a `KnackClient`
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Knack application id
    #[serde(alias = "app_id")]
    pub application_id: String,

    /// REST API key of the application
    pub api_key: String,

    /// API base URL; every request path is relative to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to each request; requests run until the transport
    /// gives up when unset
    #[serde(
        rename = "timeout_secs",
        default,
        skip_serializing_if = "Option::is_none",
        with = "duration_secs"
    )]
    pub timeout: Option<Duration>,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional client-side throttle; off unless configured
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("knack-client/{}", env!("CARGO_PKG_VERSION"))
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(deserializer).map(|secs| secs.map(Duration::from_secs))
    }
}

impl ClientConfig {
    /// Create a config with default transport settings
    pub fn new(application_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout: None,
            user_agent: default_user_agent(),
            rate_limit: None,
        }
    }

    /// Create a new config builder
    pub fn builder(
        application_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(application_id, api_key),
        }
    }

    /// Load a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Check the credentials are present and the base URL is usable
    pub fn validate(&self) -> Result<()> {
        require_key("application_id", &self.application_id)?;
        require("api_key", &self.api_key)?;

        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url '{}' cannot be used as a base URL",
                self.base_url
            )));
        }

        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(Error::config("timeout must be greater than zero"));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("application_id", &self.application_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

/// Builder for client config
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Bound every request by `timeout`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Throttle outgoing requests on the client side
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("app", "key");
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, None);
        assert!(config.user_agent.starts_with("knack-client/"));
        assert!(config.rate_limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder("app", "key")
            .base_url("http://localhost:8080/v1/")
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent/1.0")
            .rate_limit(RateLimiterConfig::per_second(5).burst(2))
            .build();

        assert_eq!(config.base_url, "http://localhost:8080/v1/");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::per_second(5).burst(2)));
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let err = ClientConfig::new("", "key").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "application_id"));

        let err = ClientConfig::new("app", "   ").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "api_key"));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = ClientConfig::builder("app", "key")
            .base_url("not a url")
            .build();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig::builder("app", "key")
            .base_url("mailto:someone@example.com")
            .build();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r"
app_id: app_123
api_key: key_456
timeout_secs: 10
rate_limit:
  requests_per_second: 8
  burst_size: 4
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.application_id, "app_123");
        assert_eq!(config.api_key, "key_456");
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::per_second(8).burst(4)));
    }

    #[test]
    fn test_from_yaml_str_missing_key() {
        let result = ClientConfig::from_yaml_str("application_id: app_123\n");
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    fn test_timeout_is_left_to_caller() {
        let config = ClientConfig::from_yaml_str("application_id: a\napi_key: b\n").unwrap();
        assert!(config.timeout.is_none());

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("timeout_secs"));

        let zero = ClientConfig::builder("a", "b").timeout(Duration::ZERO).build();
        assert!(matches!(zero.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knack.yaml");
        fs::write(&path, "application_id: a\napi_key: b\n").unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        assert_eq!(config.application_id, "a");

        let missing = ClientConfig::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("app", "super-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("app"));
        assert!(!debug.contains("super-secret"));
    }
}
