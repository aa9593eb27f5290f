//! Logging setup
//!
//! The level comes from `ENCYCLOPEDIA_LOG` (falling back to a per-command
//! default) and applies to the encyclopedia crates and the HTTP trace layer.
//! Output goes to `log_file` when configured, stderr otherwise.

use std::fs::OpenOptions;

use tracing::info;
use tracing_subscriber::EnvFilter;

use encyclopedia_core::Config;

/// Environment variable holding the log level
const LOG_ENV: &str = "ENCYCLOPEDIA_LOG";

/// Install the global tracing subscriber
pub fn init_logging(config: &Config, default_level: &str) {
    let level = std::env::var(LOG_ENV)
        .ok()
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| default_level.to_string());
    let env_filter = EnvFilter::new(filter_directives(level.trim()));

    if let Some(log_path) = &config.log_file {
        let log_file = OpenOptions::new().create(true).append(true).open(log_path);
        match log_file {
            Ok(file) => {
                // Ignore error if already initialized
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(file)
                    .try_init();
                info!("Logging to {:?}", log_path);
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn filter_directives(level: &str) -> String {
    ["encyclopedia_core", "encyclopedia_web", "encyclopedia_cli", "tower_http"]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}
