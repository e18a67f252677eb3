//! Configuration management for EventMate.
//!
//! Loads configuration from ${EVENTMATE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "EVENTMATE_API_URL";

pub mod paths {
    //! Path resolution for EventMate configuration and data files.
    //!
    //! EVENTMATE_HOME resolution order:
    //! 1. EVENTMATE_HOME environment variable (if set)
    //! 2. ~/.config/eventmate (default)

    use std::path::PathBuf;

    /// Returns the EventMate home directory.
    pub fn eventmate_home() -> PathBuf {
        if let Ok(home) = std::env::var("EVENTMATE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("eventmate")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        eventmate_home().join("config.toml")
    }

    /// Returns the path to the persisted session flag.
    pub fn session_path() -> PathBuf {
        eventmate_home().join("session.json")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level directive for EventMate crates (`info`, `debug`, ...).
    pub level: String,
    /// Log file; relative paths resolve against EVENTMATE_HOME.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("eventmate.log"),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Event API.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// strftime pattern for the Date column.
    pub date_format: String,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            date_format: Self::DEFAULT_DATE_FORMAT.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_API_URL: &'static str = "https://event-mate-ten.vercel.app";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Matches the `M/D/YYYY` shape of an en-US locale date.
    pub const DEFAULT_DATE_FORMAT: &'static str = "%-m/%-d/%Y";

    /// Loads configuration from the default path, then applies environment
    /// overrides.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or a value is
    /// invalid.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            config
                .set_api_url(&url)
                .with_context(|| format!("Invalid {API_URL_ENV}"))?;
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or a value is
    /// invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Writes the default config template to `path`.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Replaces the API URL after validating it.
    ///
    /// # Errors
    /// Returns an error if the URL is not an absolute http(s) URL.
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim();
        validate_api_url(trimmed)?;
        self.api_url = trimmed.to_string();
        Ok(())
    }

    /// Checks values that would otherwise fail later at runtime.
    ///
    /// # Errors
    /// Returns an error naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        validate_api_url(&self.api_url)?;
        validate_date_format(&self.date_format)?;
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves the log file path against EVENTMATE_HOME.
    pub fn log_path(&self) -> PathBuf {
        if self.logging.file.is_absolute() {
            self.logging.file.clone()
        } else {
            paths::eventmate_home().join(&self.logging.file)
        }
    }
}

/// Returns the commented config template written by `config init`.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

fn validate_api_url(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url).with_context(|| format!("Invalid API URL: {url}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Invalid API URL: {url} (expected http or https)");
    }
    Ok(())
}

/// Rejects strftime patterns chrono cannot render.
///
/// # Errors
/// Returns an error if the pattern contains an unknown specifier.
pub fn validate_date_format(pattern: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};

    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        bail!("Invalid date_format: {pattern}");
    }
    Ok(())
}
