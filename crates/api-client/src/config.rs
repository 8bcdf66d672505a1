//! Configuration for the FatSecret API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default REST endpoint (HTTPS upgrade of the documented `http://` URL)
pub const DEFAULT_API_URL: &str = "https://platform.fatsecret.com/rest/server.api";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Response format requested through the `format` parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// JSON (parsed by the client)
    #[default]
    Json,
    /// XML (sent to the API, returned as raw text only)
    Xml,
}

impl ResponseFormat {
    /// Wire value for the `format` parameter
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Parse a format name, case-insensitively
    pub fn parse(value: &str) -> ApiResult<Self> {
        match value.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(ApiError::config(format!("unknown response format: {other}"))),
        }
    }
}

/// OAuth consumer credentials.
///
/// The secret only ever feeds the HMAC key. It is redacted from `Debug`
/// output and never serialized.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Public consumer key, sent as `oauth_consumer_key`
    pub consumer_key: String,
    /// Shared consumer secret
    #[serde(skip_serializing, default)]
    pub consumer_secret: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST endpoint every request is signed against
    pub base_url: String,
    /// Consumer credentials
    pub credentials: Credentials,
    /// Requested response format
    #[serde(default)]
    pub format: ResponseFormat,
    /// Region code, passed through without tier checks
    pub region: Option<String>,
    /// Language code, passed through without tier checks
    pub language: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl ClientConfig {
    /// Create a configuration with default endpoint and options
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            credentials: Credentials::new(consumer_key, consumer_secret),
            format: ResponseFormat::default(),
            region: None,
            language: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `FATSECRET_CONSUMER_KEY`: consumer key (required)
    /// - `FATSECRET_CONSUMER_SECRET`: consumer secret (required)
    /// - `FATSECRET_API_URL`: REST endpoint override
    /// - `FATSECRET_FORMAT`: `json` or `xml`
    /// - `FATSECRET_REGION`, `FATSECRET_LANGUAGE`: localisation parameters
    /// - `FATSECRET_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let consumer_key = env::var("FATSECRET_CONSUMER_KEY")
            .map_err(|_| ApiError::missing_env("FATSECRET_CONSUMER_KEY"))?;
        let consumer_secret = env::var("FATSECRET_CONSUMER_SECRET")
            .map_err(|_| ApiError::missing_env("FATSECRET_CONSUMER_SECRET"))?;

        let mut config = Self::new(consumer_key, consumer_secret);

        if let Ok(url) = env::var("FATSECRET_API_URL") {
            config.base_url = url;
        }

        if let Ok(format) = env::var("FATSECRET_FORMAT") {
            config.format = ResponseFormat::parse(&format)?;
        }

        config.region = env::var("FATSECRET_REGION").ok();
        config.language = env::var("FATSECRET_LANGUAGE").ok();

        config.timeout = env::var("FATSECRET_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the response format
    #[must_use]
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder-style method to set the region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builder-style method to set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.credentials.consumer_key.is_empty() {
            return Err(ApiError::config("consumer_key cannot be empty"));
        }

        if self.credentials.consumer_secret.is_empty() {
            return Err(ApiError::config("consumer_secret cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("key", "secret");
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.format, ResponseFormat::Json);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.region.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::new("key", "secret")
            .with_base_url("http://localhost:8080/rest/server.api")
            .with_region("FR")
            .with_language("fr")
            .with_format(ResponseFormat::Xml)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:8080/rest/server.api");
        assert_eq!(config.region.as_deref(), Some("FR"));
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.format.as_str(), "xml");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::new("key", "secret").validate().is_ok());
        assert!(ClientConfig::new("", "secret").validate().is_err());
        assert!(ClientConfig::new("key", "").validate().is_err());
        assert!(ClientConfig::new("key", "secret").with_base_url("").validate().is_err());
        assert!(ClientConfig::new("key", "secret")
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
        assert!(ClientConfig::new("key", "secret")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_secret_not_leaked() {
        let config = ClientConfig::new("public-key", "very-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("public-key"));
        assert!(!debug.contains("very-secret"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("very-secret"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ResponseFormat::parse("JSON").unwrap(), ResponseFormat::Json);
        assert_eq!(ResponseFormat::parse("xml").unwrap(), ResponseFormat::Xml);
        assert!(ResponseFormat::parse("yaml").is_err());
    }
}
