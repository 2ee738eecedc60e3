//! Configuration loading and validation commands.
//!
//! Configuration is loaded from a TOML file (or the embedded default) and
//! merged with environment variables prefixed with `R2B2__`. For example,
//! `R2B2__ADAPTER__DEBUG=true` overrides `adapter.debug`.

use std::fs;
use std::path::{Path, PathBuf};

use r2b2_common::settings::Settings;
use validator::Validate;

use crate::error::CliError;

/// Load and merge configuration from a TOML file with environment variables.
///
/// Falls back to the embedded defaults when no file is given.
pub(crate) fn load_settings(file: Option<&Path>, verbose: bool) -> Result<Settings, CliError> {
    let settings = match file {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| CliError::read_input(path, e))?;
            if verbose {
                log::debug!("Loading config from: {}", path.display());
            }
            Settings::from_toml(&content)
        }
        None => Settings::new(),
    }
    .map_err(|e| CliError::config(format!("Failed to parse and merge config: {e:?}")))?;

    settings
        .validate()
        .map_err(|e| CliError::config(format!("Settings validation failed: {e}")))?;

    Ok(settings)
}

/// Validate configuration file.
///
/// Validates TOML syntax and endpoint values after merging environment
/// overrides, then prints the merged configuration.
pub fn validate(file: PathBuf, verbose: bool) -> Result<(), CliError> {
    let settings = load_settings(Some(&file), verbose)?;
    let merged_toml = settings
        .to_canonical_toml()
        .map_err(|e| CliError::config(format!("Failed to serialize merged config: {e:?}")))?;

    println!("Configuration is valid");
    println!("  File: {}", file.display());
    println!("  Bid URL: {}", settings.adapter.bid_url);
    println!("  Sync URL: {}", settings.adapter.sync_url);
    println!("  Debug: {}", settings.adapter.debug);

    if verbose {
        let value: toml::Value = toml::from_str(&merged_toml)
            .map_err(|e| CliError::config(format!("Failed to read merged config: {e}")))?;
        if let Some(table) = value.as_table() {
            println!("\nSections found:");
            for key in table.keys() {
                println!("  - [{}]", key);
            }
        }
    }

    Ok(())
}
