//! SDK service implementations
//!
//! This module provides the service classes for the classifier API.

mod classifier;

pub use classifier::ClassifierService;
