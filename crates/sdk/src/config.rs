//! SDK configuration
//!
//! This module provides configuration options for the SDK client.

use crate::error::{SdkError, SdkResult};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the service, without the `/v1` suffix
    pub base_url: String,

    /// Service username (HTTP basic auth)
    pub username: Option<String>,

    /// Service password (HTTP basic auth)
    pub password: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Enable request/response logging
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_API_URL.to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("nlc-sdk/{}", crate::VERSION),
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - `NLC_URL`: Base URL for the service
    /// - `NLC_USERNAME`: Service username
    /// - `NLC_PASSWORD`: Service password
    /// - `NLC_TIMEOUT`: Request timeout in seconds
    /// - `NLC_DEBUG`: Enable debug logging
    pub fn from_env() -> SdkResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("NLC_URL") {
            config.base_url = url;
        }

        if let Ok(username) = std::env::var("NLC_USERNAME") {
            config.username = Some(username);
        }

        if let Ok(password) = std::env::var("NLC_PASSWORD") {
            config.password = Some(password);
        }

        if let Ok(timeout) = std::env::var("NLC_TIMEOUT") {
            let secs: u64 = timeout.parse().map_err(|_| SdkError::ConfigError {
                message: format!("Invalid timeout value: {}", timeout),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if std::env::var("NLC_DEBUG").is_ok() {
            config.debug = true;
        }

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the username and password
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> SdkResult<()> {
        if self.base_url.is_empty() {
            return Err(SdkError::ConfigError {
                message: "Base URL cannot be empty".to_string(),
            });
        }

        let url = url::Url::parse(&self.base_url).map_err(|e| SdkError::ConfigError {
            message: format!("Invalid base URL: {}", e),
        })?;
        if url.cannot_be_a_base() {
            return Err(SdkError::ConfigError {
                message: format!("Base URL cannot take a path: {}", self.base_url),
            });
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(SdkError::ConfigError {
                message: "A password was given without a username".to_string(),
            });
        }

        Ok(())
    }

    /// Check if credentials are configured
    pub fn has_auth(&self) -> bool {
        self.username.is_some()
    }

    /// Full URL for the given path segments, each percent-encoded on its own
    /// so that an id containing `/`, `?` or `#` stays a single segment
    pub fn endpoint(&self, segments: &[&str]) -> SdkResult<url::Url> {
        let mut url = url::Url::parse(&self.base_url).map_err(|e| SdkError::ConfigError {
            message: format!("Invalid base URL: {}", e),
        })?;

        url.path_segments_mut()
            .map_err(|_| SdkError::ConfigError {
                message: format!("Base URL cannot take a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, crate::DEFAULT_API_URL);
        assert!(config.username.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.has_auth());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("https://custom.example.com/api")
            .with_credentials("user", "secret")
            .with_timeout(Duration::from_secs(60))
            .with_debug(true);

        assert_eq!(config.base_url, "https://custom.example.com/api");
        assert_eq!(config.username, Some("user".to_string()));
        assert_eq!(config.password, Some("secret".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.debug);
        assert!(config.has_auth());
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::new();
        assert!(config.validate().is_ok());

        let config = ClientConfig::new().with_base_url("");
        assert!(config.validate().is_err());

        let config = ClientConfig::new().with_base_url("not-a-url");
        assert!(config.validate().is_err());

        let mut config = ClientConfig::new();
        config.password = Some("orphan".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::new().with_base_url("http://localhost:8080/api/");
        assert_eq!(
            config.endpoint(&["v1", "classifiers"]).unwrap().as_str(),
            "http://localhost:8080/api/v1/classifiers"
        );

        let config = ClientConfig::new().with_base_url("http://localhost:8080");
        assert_eq!(
            config.endpoint(&["v1", "classifiers"]).unwrap().as_str(),
            "http://localhost:8080/v1/classifiers"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let config = ClientConfig::new().with_base_url("http://localhost:8080");
        let url = config
            .endpoint(&["v1", "classifiers", "a/b?c#d e", "classify"])
            .unwrap();
        assert_eq!(url.path(), "/v1/classifiers/a%2Fb%3Fc%23d%20e/classify");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_opaque_base_url_is_rejected() {
        let config = ClientConfig::new().with_base_url("mailto:nlc@example.com");
        assert!(config.validate().is_err());
    }
}
