//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/encyclopedia/config.toml)
//! 3. Environment variables (ENCYCLOPEDIA_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable prefix
const ENV_PREFIX: &str = "ENCYCLOPEDIA";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one Markdown file per entry
    #[serde(default = "default_entries_dir")]
    pub entries_dir: PathBuf,

    /// Address the web server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the web server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log file (stderr when unset)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entries_dir: default_entries_dir(),
            host: default_host(),
            port: default_port(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (ENCYCLOPEDIA_ENTRIES_DIR, ENCYCLOPEDIA_HOST, ...)
    /// 2. Config file (~/.config/encyclopedia/config.toml or ENCYCLOPEDIA_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_entries_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_ENTRIES_DIR", ENV_PREFIX)) {
            self.entries_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_HOST", ENV_PREFIX)) {
            if !val.is_empty() {
                self.host = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_PORT", ENV_PREFIX)) {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid {}_PORT value: {:?}", ENV_PREFIX, val),
            }
        }

        // Empty string clears it
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Ensure entries directory exists
    fn ensure_entries_dir(&self) -> Result<()> {
        if !self.entries_dir.exists() {
            std::fs::create_dir_all(&self.entries_dir).with_context(|| {
                format!("Failed to create entries directory: {:?}", self.entries_dir)
            })?;
        }
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with ENCYCLOPEDIA_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("encyclopedia")
            .join("config.toml")
    }

    /// `host:port` for the web server listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Get the default entries directory
fn default_entries_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("encyclopedia")
        .join("entries")
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "ENCYCLOPEDIA_ENTRIES_DIR",
        "ENCYCLOPEDIA_HOST",
        "ENCYCLOPEDIA_PORT",
        "ENCYCLOPEDIA_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.log_file.is_none());
        assert!(config.entries_dir.ends_with("encyclopedia/entries"));
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_env_override_entries_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("ENCYCLOPEDIA_ENTRIES_DIR", "/tmp/encyclopedia-test");
        config.apply_env_overrides();

        assert_eq!(config.entries_dir, PathBuf::from("/tmp/encyclopedia-test"));
    }

    #[test]
    fn test_env_override_port() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("ENCYCLOPEDIA_PORT", "8123");
        config.apply_env_overrides();
        assert_eq!(config.port, 8123);

        // Garbage is ignored, previous value kept
        env::set_var("ENCYCLOPEDIA_PORT", "not-a-port");
        config.apply_env_overrides();
        assert_eq!(config.port, 8123);
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("ENCYCLOPEDIA_LOG_FILE", "/tmp/encyclopedia.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/encyclopedia.log")));

        // Empty string clears it
        env::set_var("ENCYCLOPEDIA_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            entries_dir: PathBuf::from("/data/entries"),
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("entries_dir"));
        assert!(toml_str.contains("port"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.entries_dir, config.entries_dir);
        assert_eq!(parsed.host, config.host);
        assert_eq!(parsed.port, config.port);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            entries_dir = "/custom/entries"
            port = 5000
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.entries_dir, PathBuf::from("/custom/entries"));
        assert_eq!(config.port, 5000);
        // Unset keys fall back to defaults
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_path_creates_entries_dir() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let entries = temp_dir.path().join("wiki").join("entries");

        let config_path = temp_dir.path().join("config.toml");
        let config = Config {
            entries_dir: entries.clone(),
            ..Config::default()
        };
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.entries_dir, entries);
        assert!(entries.is_dir());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        env::set_var(
            "ENCYCLOPEDIA_ENTRIES_DIR",
            temp_dir.path().join("entries").to_str().unwrap(),
        );

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
    }
}
