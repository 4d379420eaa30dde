//! SDK error types
//!
//! This module defines the error types used throughout the SDK.

use thiserror::Error;

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Credentials were rejected by the service
    #[error("Authentication failed: {message}")]
    Unauthorized {
        /// Error message
        message: String,
        /// HTTP status code
        status_code: u16,
    },

    /// Classifier was not found
    #[error("Resource not found: {resource_type} '{resource_id}'")]
    NotFound {
        /// Type of resource (e.g., "classifier")
        resource_type: String,
        /// ID of the resource, or the requested path when no id is known
        resource_id: String,
    },

    /// The service rejected the request (bad training data, too many classifiers, ...)
    #[error("Bad request ({status_code}): {message}")]
    BadRequest {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// Configured request timeout
        duration: std::time::Duration,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Error message
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Server error
    #[error("Server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Service returned an unexpected response
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Error message
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Any other status the service reported
    #[error("API error: {code} - {message}")]
    ApiError {
        /// Error code
        code: String,
        /// Error message
        message: String,
    },
}

impl SdkError {
    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::Unauthorized { status_code, .. } => Some(*status_code),
            SdkError::BadRequest { status_code, .. } => Some(*status_code),
            SdkError::ServerError { status_code, .. } => Some(*status_code),
            SdkError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        SdkError::NotFound {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    /// Build the error for a non-success status on `path` and its (already
    /// parsed) message
    pub fn from_status(status_code: u16, path: &str, message: String) -> Self {
        match status_code {
            401 | 403 => SdkError::Unauthorized {
                message,
                status_code,
            },
            404 => SdkError::not_found("resource", path),
            400 | 409 | 413 | 415 | 422 => SdkError::BadRequest {
                status_code,
                message,
            },
            500..=599 => SdkError::ServerError {
                status_code,
                message,
            },
            _ => SdkError::ApiError {
                code: status_code.to_string(),
                message,
            },
        }
    }

    /// Name the classifier a not-found error was about
    pub(crate) fn for_classifier(self, classifier_id: &str) -> Self {
        match self {
            SdkError::NotFound { .. } => SdkError::not_found("classifier", classifier_id),
            other => other,
        }
    }
}

/// Convert from reqwest errors
impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            SdkError::NetworkError {
                message: "Connection failed".to_string(),
                source: Some(Box::new(err)),
            }
        } else if let Some(status) = err.status() {
            let path = err.url().map(|u| u.path().to_string()).unwrap_or_default();
            SdkError::from_status(status.as_u16(), &path, err.to_string())
        } else {
            SdkError::NetworkError {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Convert from JSON errors
impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::SerializationError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
