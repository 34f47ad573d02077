//! Configuration module for dikti
//!
//! Manages application configuration: the API base URL, pagination and
//! debounce tuning, and the request timeout. Configuration is stored in
//! the user's config directory and every value has a sensible default, so
//! the tool works without any setup.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File, FileFormat};
use dialoguer::{Input, theme::ColorfulTheme};
use serde::{Deserialize, Serialize};

/// Default API host, the public PDDIKTI proxy
pub const DEFAULT_BASE_URL: &str = "https://pddikti-backend.vercel.app";

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_FETCH_LIMIT: u32 = 100;
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DiktiConfig {
    /// Base URL of the PDDIKTI API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Rows shown per page in the results table
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Result window requested from the search endpoint per query;
    /// pagination slices this window client-side
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Milliseconds the search input must be stable before a request
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_fetch_limit() -> u32 {
    DEFAULT_FETCH_LIMIT
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DiktiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DiktiConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be
    /// determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("dikti").join("config.toml"))
    }

    /// Load configuration from file, falling back to defaults when the
    /// file does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an existing config file cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created,
    /// the configuration cannot be serialized, or the file cannot be
    /// written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Debounce delay as a `Duration`
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or an unparseable value.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(ConfigError::Message(format!(
                        "base_url must start with http:// or https://, got '{value}'"
                    )));
                }
                self.base_url = value.trim_end_matches('/').to_string();
            }
            "page_size" => {
                self.page_size = parse_positive(key, value)?;
            }
            "fetch_limit" => {
                self.fetch_limit = parse_positive(key, value)?;
            }
            "debounce_ms" => {
                self.debounce_ms = value
                    .parse()
                    .map_err(|e| ConfigError::Message(format!("Invalid value for {key}: {e}")))?;
            }
            "timeout_secs" => {
                self.timeout_secs = parse_positive(key, value)?;
            }
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown configuration key '{key}'"
                )));
            }
        }
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => Some(self.base_url.clone()),
            "page_size" => Some(self.page_size.to_string()),
            "fetch_limit" => Some(self.fetch_limit.to_string()),
            "debounce_ms" => Some(self.debounce_ms.to_string()),
            "timeout_secs" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    /// Interactive setup - prompts for the API host and page size
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if user input cannot be read or if saving the
    /// configuration fails.
    pub fn interactive_init() -> Result<Self, ConfigError> {
        let current = Self::load().unwrap_or_default();

        let base_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("API base URL")
            .default(current.base_url.clone())
            .interact_text()
            .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

        let page_size: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Results per page")
            .default(current.page_size)
            .interact_text()
            .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

        let mut config = current;
        config.set_value("base_url", &base_url)?;
        config.page_size = page_size.max(1);

        config.save()?;

        println!("\nConfiguration saved successfully!");
        Ok(config)
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let parsed: T = value
        .parse()
        .map_err(|e| ConfigError::Message(format!("Invalid value for {key}: {e}")))?;
    if parsed <= T::default() {
        return Err(ConfigError::Message(format!("{key} must be positive")));
    }
    Ok(parsed)
}
