//! Configuration commands

use anyhow::Result;

use crate::config::Config;
use crate::output::{OutputFormat, TableFormatter};

/// Show the effective configuration with the password masked
pub fn show(config: &Config) -> Result<()> {
    let items = config.display_items();

    match config.output_format {
        OutputFormat::Table => println!("{}", TableFormatter::key_value(items)?),
        OutputFormat::Json | OutputFormat::Plain => {
            println!("Current configuration:");
            for (key, value) in items {
                println!("  {}: {}", key, value);
            }
        }
    }

    Ok(())
}
