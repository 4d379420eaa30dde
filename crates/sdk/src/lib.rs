//! # NLC SDK
//!
//! Rust client for the Natural Language Classifier REST API (v1).
//!
//! The SDK wraps the five operations the service exposes:
//!
//! - **Create**: upload training data and start training a classifier
//! - **Status**: poll the training state of a classifier
//! - **Classify**: send a phrase and receive ranked classes
//! - **List**: enumerate the classifiers owned by the account
//! - **Remove**: delete a classifier
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nlc_sdk::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .username("service-user")
//!         .password("service-password")
//!         .build()?;
//!
//!     let result = client.classifiers().classify("10D41B-nlc-1", "How hot is it?").await?;
//!     println!("{} ({} classes)", result.top_class, result.classes.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! The SDK can be configured through environment variables:
//!
//! - `NLC_URL`: service endpoint URL
//! - `NLC_USERNAME` / `NLC_PASSWORD`: service credentials
//!
//! ## Error Handling
//!
//! All operations return `Result<T, SdkError>`:
//!
//! ```rust,no_run
//! use nlc_sdk::{Client, SdkError};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = Client::from_env()?;
//! match client.classifiers().status("missing").await {
//!     Ok(status) => println!("{}: {}", status.classifier_id, status.status),
//!     Err(SdkError::NotFound { .. }) => println!("Classifier not found"),
//!     Err(SdkError::Unauthorized { .. }) => println!("Invalid credentials"),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

// Re-exports
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{SdkError, SdkResult};
pub use models::*;
pub use services::ClassifierService;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{Client, ClientBuilder};
    pub use crate::config::ClientConfig;
    pub use crate::error::{SdkError, SdkResult};
    pub use crate::models::*;
    pub use crate::services::*;
}

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default service URL
pub const DEFAULT_API_URL: &str =
    "https://gateway.watsonplatform.net/natural-language-classifier/api";
