//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use encyclopedia_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "entries_dir": config.entries_dir,
                    "host": config.host,
                    "port": config.port,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.entries_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  entries_dir: {}", config.entries_dir.display());
            println!("  host:        {}", config.host);
            println!("  port:        {}", config.port);
            println!(
                "  log_file:    {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "entries_dir" => {
            if value.trim().is_empty() {
                bail!("entries_dir cannot be empty");
            }
            config.entries_dir = value.into();
        }
        "host" => {
            if value.trim().is_empty() {
                bail!("host cannot be empty");
            }
            config.host = value.to_string();
        }
        "port" => {
            config.port = value
                .parse()
                .with_context(|| format!("Invalid port '{}'. Use a number 1-65535.", value))?;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: entries_dir, host, port, log_file",
                key
            );
        }
    }
    Ok(())
}
