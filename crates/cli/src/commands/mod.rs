//! CLI commands

pub mod blind;
pub mod classifier;
pub mod config;
pub mod input;

use crate::config::Config;
use crate::output::Formattable;
use anyhow::{Context, Result};
use nlc_sdk::Client;

/// Context passed to all commands
pub struct CommandContext {
    pub config: Config,
    pub client: Client,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: Config) -> Result<Self> {
        let client =
            Client::new(config.client_config()).context("Failed to create classifier client")?;
        Ok(Self { config, client })
    }

    /// Print a value in the configured output format
    pub fn print<T: Formattable>(&self, value: &T) -> Result<()> {
        println!("{}", value.format(self.config.output_format)?);
        Ok(())
    }
}
