//! NLC CLI Library
//!
//! Core of the `nlc` command-line client: configuration, input loading,
//! command handlers and output formatting. The binary in `main.rs` only
//! parses arguments and dispatches here.

pub mod commands;
pub mod config;
pub mod interactive;
pub mod output;

pub use config::Config;
pub use output::{Formattable, JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
