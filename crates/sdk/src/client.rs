//! SDK client implementation
//!
//! This module provides the main client for talking to the classifier service.

use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};
use crate::services::ClassifierService;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Main SDK client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("nlc-sdk")),
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SdkError::ConfigError {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Create a client from environment variables
    pub fn from_env() -> SdkResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get the classifier service
    pub fn classifiers(&self) -> ClassifierService {
        ClassifierService::new(self.clone())
    }

    /// Attach basic auth credentials when configured
    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.config.username {
            Some(username) => builder.basic_auth(username, self.inner.config.password.as_ref()),
            None => builder,
        }
    }

    /// Make a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> SdkResult<T> {
        self.request(reqwest::Method::GET, segments, Option::<&()>::None)
            .await
    }

    /// Make a POST request with a JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> SdkResult<T> {
        self.request(reqwest::Method::POST, segments, Some(body)).await
    }

    /// Make a multipart POST request
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: reqwest::multipart::Form,
    ) -> SdkResult<T> {
        let url = self.inner.config.endpoint(segments)?;

        if self.inner.config.debug {
            debug!("SDK request: POST {} (multipart)", url);
        }

        let request = self.with_auth(self.inner.http.post(url).multipart(form));
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Make a DELETE request, returning whatever JSON the service answered with
    pub(crate) async fn delete(&self, segments: &[&str]) -> SdkResult<serde_json::Value> {
        let url = self.inner.config.endpoint(segments)?;

        if self.inner.config.debug {
            debug!("SDK request: DELETE {}", url);
        }

        let response = self
            .with_auth(self.inner.http.delete(url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }

        serde_json::from_str(&text).map_err(|e| SdkError::InvalidResponse {
            message: format!("Failed to parse response: {}", e),
        })
    }

    /// Make a request with optional body
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> SdkResult<T> {
        let url = self.inner.config.endpoint(segments)?;

        if self.inner.config.debug {
            debug!("SDK request: {} {}", method, url);
        }

        let mut request = self.with_auth(self.inner.http.request(method, url));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Handle successful response
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> SdkResult<T> {
        if response.status().is_success() {
            let text = response.text().await.map_err(|e| self.transport_error(e))?;

            if self.inner.config.debug {
                debug!("SDK response body: {}", text);
            }

            serde_json::from_str(&text).map_err(|e| {
                error!("Failed to parse response: {}", e);
                SdkError::InvalidResponse {
                    message: format!("Failed to parse response: {}", e),
                }
            })
        } else {
            Err(self.handle_error_response(response).await)
        }
    }

    /// Handle error response
    async fn handle_error_response(&self, response: reqwest::Response) -> SdkError {
        let status_code = response.status().as_u16();
        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        if self.inner.config.debug {
            debug!("SDK error response ({}): {}", status_code, body);
        }

        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_error) => api_error.message(),
            Err(_) if body.trim().is_empty() => format!("Request failed with status {}", status_code),
            Err(_) => body,
        };

        SdkError::from_status(status_code, &path, message)
    }

    /// Timeouts carry the configured limit; everything else maps as usual
    fn transport_error(&self, err: reqwest::Error) -> SdkError {
        if err.is_timeout() {
            SdkError::Timeout {
                duration: self.inner.config.timeout,
            }
        } else {
            SdkError::from(err)
        }
    }
}

/// Error body returned by the service, e.g.
/// `{"code": 404, "error": "Not found", "description": "Classifier not found."}`
#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    error: Option<String>,
    description: Option<String>,
}

impl ApiErrorResponse {
    fn message(self) -> String {
        match (self.error, self.description) {
            (Some(error), Some(description)) => format!("{}: {}", error, description),
            (Some(error), None) => error,
            (None, Some(description)) => description,
            (None, None) => "Unknown error".to_string(),
        }
    }
}

/// Client builder for ergonomic configuration
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Load configuration from environment
    pub fn from_env(mut self) -> SdkResult<Self> {
        self.config = ClientConfig::from_env()?;
        Ok(self)
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self
    }

    /// Set the password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Enable debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the client
    pub fn build(self) -> SdkResult<Client> {
        Client::new(self.config)
    }
}
