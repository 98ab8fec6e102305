//! Configuration CLI command handlers

use crate::cli::commands::ConfigCommand;
use crate::core::config::{display_value, Config};
use crate::error::Result;

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(&key, &value),
        ConfigCommand::Get { key } => handle_get(&key),
        ConfigCommand::List => handle_list(),
    }
}

/// Handle setting a configuration value
fn handle_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    let stored = config.get_value(key).unwrap_or_default();
    println!("✓ Set {} = {}", key, display_value(key, &stored));
    Ok(())
}

/// Handle getting a configuration value
fn handle_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    match config.get_value(key) {
        Some(value) => println!("{} = {}", key, display_value(key, &value)),
        None => println!("Key not found: {}", key),
    }
    Ok(())
}

/// Handle listing all configuration values
fn handle_list() -> Result<()> {
    let config = Config::load()?;
    let entries = config.entries();
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    println!("aigit configuration:\n");
    for (key, value) in &entries {
        println!("  {:<width$}  {}", key, display_value(key, value), width = width);
    }
    println!("\nConfig file: {}", Config::config_path()?.display());
    Ok(())
}
