//! CLI configuration management
//!
//! Handles loading configuration from ~/.nlc/config.toml, overlaid with
//! `NLC_*` environment variables.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use nlc_evaluation::DEFAULT_CONCURRENCY;
use nlc_sdk::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Service endpoint URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Service username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Service password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Default output format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_colored")]
    pub colored: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// In-flight classification requests during a blind evaluation
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Log request and response details
    #[serde(default)]
    pub debug: bool,
}

fn default_url() -> String {
    nlc_sdk::DEFAULT_API_URL.to_string()
}

fn default_colored() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: None,
            password: None,
            output_format: OutputFormat::default(),
            colored: default_colored(),
            timeout_seconds: default_timeout(),
            concurrency: default_concurrency(),
            debug: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".nlc"))
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the config file, then apply environment
    /// overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file(&Self::config_file()?)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Override fields from environment variables looked up through `var`
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("NLC_URL") {
            self.url = url;
        }
        if let Some(username) = var("NLC_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = var("NLC_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(format) = var("NLC_OUTPUT_FORMAT") {
            self.output_format = OutputFormat::from_str(&format).with_context(|| {
                format!("Invalid NLC_OUTPUT_FORMAT '{}'. Use json, table, or plain", format)
            })?;
        }
        if let Some(concurrency) = var("NLC_CONCURRENCY") {
            self.concurrency = concurrency
                .parse()
                .with_context(|| format!("Invalid NLC_CONCURRENCY '{}'", concurrency))?;
        }
        if var("NLC_DEBUG").is_some() {
            self.debug = true;
        }
        if var("NO_COLOR").is_some() {
            self.colored = false;
        }
        Ok(())
    }

    /// Check if credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.username.is_some()
    }

    /// SDK client configuration for these settings
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new()
            .with_base_url(self.url.clone())
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_debug(self.debug);
        config.username = self.username.clone();
        config.password = self.password.clone();
        config
    }

    /// Key/value pairs for display, with the password masked
    pub fn display_items(&self) -> Vec<(&'static str, String)> {
        let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "(not set)".to_string());
        vec![
            ("URL", self.url.clone()),
            ("Username", or_unset(&self.username)),
            (
                "Password",
                self.password
                    .as_ref()
                    .map(|_| "***".to_string())
                    .unwrap_or_else(|| "(not set)".to_string()),
            ),
            ("Output Format", self.output_format.to_string()),
            ("Timeout", format!("{}s", self.timeout_seconds)),
            ("Concurrency", self.concurrency.to_string()),
            ("Colored", self.colored.to_string()),
            ("Debug", self.debug.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.url, nlc_sdk::DEFAULT_API_URL);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert!(config.colored);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            username = "svc"
            output_format = "table"
            "#,
        )
        .unwrap();
        assert_eq!(config.username.as_deref(), Some("svc"));
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.url, nlc_sdk::DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from_file(Path::new("/nonexistent/nlc/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("NLC_URL", "http://localhost:9000/api"),
                ("NLC_USERNAME", "user"),
                ("NLC_PASSWORD", "secret"),
                ("NLC_OUTPUT_FORMAT", "plain"),
                ("NLC_CONCURRENCY", "2"),
                ("NO_COLOR", "1"),
            ]))
            .unwrap();

        assert_eq!(config.url, "http://localhost:9000/api");
        assert_eq!(config.username.as_deref(), Some("user"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.output_format, OutputFormat::Plain);
        assert_eq!(config.concurrency, 2);
        assert!(!config.colored);
    }

    #[test]
    fn test_invalid_env_values_are_rejected() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[("NLC_CONCURRENCY", "many")])).is_err());
        assert!(config.apply_env(env(&[("NLC_OUTPUT_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn test_client_config_mapping() {
        let config = Config {
            url: "http://localhost:9000/api".to_string(),
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
            timeout_seconds: 5,
            ..Config::default()
        };
        let client_config = config.client_config();
        assert_eq!(client_config.base_url, "http://localhost:9000/api");
        assert_eq!(client_config.username.as_deref(), Some("user"));
        assert_eq!(client_config.timeout, Duration::from_secs(5));
        assert!(client_config.validate().is_ok());
    }

    #[test]
    fn test_display_masks_password() {
        let config = Config {
            password: Some("secret".to_string()),
            ..Config::default()
        };
        let items = config.display_items();
        let password = items.iter().find(|(k, _)| *k == "Password").unwrap();
        assert_eq!(password.1, "***");
        assert!(!items.iter().any(|(_, v)| v.contains("secret")));
    }
}
