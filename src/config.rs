//! Configuration management for the weatherboard
//!
//! Handles loading configuration from a TOML file, a `.env` file and
//! environment variables, and provides validation for all configuration
//! settings.

use crate::WeatherboardError;
use crate::models::Credential;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable holding the OpenWeatherMap key
pub const API_KEY_ENV: &str = "OPEN_WEATHER_API";

/// Environment variable pointing at a config file
pub const CONFIG_PATH_ENV: &str = "WEATHERBOARD_CONFIG";

/// Dotenv file read from the working directory
pub const DOTENV_FILE: &str = ".env";

/// Root configuration structure for the weatherboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherboardConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; fetching is disabled without it
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8501
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherConfig {
    /// The configured key, if it is usable
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.api_key.as_deref().and_then(Credential::new)
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl WeatherboardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::get_config_path);

        let mut config = if config_file.exists() {
            let raw = std::fs::read_to_string(&config_file).with_context(|| {
                format!("Failed to read config file: {}", config_file.display())
            })?;
            Self::from_toml(&raw).with_context(|| {
                format!("Failed to parse config file: {}", config_file.display())
            })?
        } else {
            Self::default()
        };

        // Process environment wins over the dotenv file
        let dotenv = read_dotenv(Path::new(DOTENV_FILE))?;
        config.apply_env_overrides(|name| {
            env::var(name)
                .ok()
                .or_else(|| dotenv.get(name).cloned())
        })?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document; absent sections fall back to defaults
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).with_context(|| "Failed to deserialize configuration")
    }

    /// Get the configuration file path
    #[must_use]
    pub fn get_config_path() -> PathBuf {
        env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("weatherboard.toml"))
    }

    /// Override settings from environment variables.
    ///
    /// `lookup` resolves a variable name; `load` checks the process
    /// environment first, then the `.env` file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.weather.api_key = Some(key);
        }
        if let Some(key) = lookup("WEATHERBOARD_WEATHER_API_KEY") {
            self.weather.api_key = Some(key);
        }
        if let Some(url) = lookup("WEATHERBOARD_WEATHER_BASE_URL") {
            self.weather.base_url = url;
        }
        if let Some(timeout) = lookup("WEATHERBOARD_WEATHER_TIMEOUT_SECONDS") {
            let seconds = timeout.trim().parse::<u64>().with_context(|| {
                format!("WEATHERBOARD_WEATHER_TIMEOUT_SECONDS is not a number: {timeout}")
            })?;
            self.weather.timeout_seconds = Some(seconds);
        }
        if let Some(host) = lookup("WEATHERBOARD_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WEATHERBOARD_SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("WEATHERBOARD_SERVER_PORT is not a valid port: {port}"))?;
        }
        if let Some(level) = lookup("WEATHERBOARD_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(format) = lookup("WEATHERBOARD_LOG_FORMAT") {
            self.logging.format = format.to_lowercase();
        }
        Ok(())
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .weather
            .api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.weather.api_key = None;
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        self.weather.base_url = self.weather.base_url.trim_end_matches('/').to_string();
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings.
    ///
    /// A missing API key is not an error; the dashboard asks for input instead.
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if let Some(timeout) = self.weather.timeout_seconds {
            if timeout == 0 {
                return Err(
                    WeatherboardError::config("Weather API timeout must be at least 1 second")
                        .into(),
                );
            }
            if timeout > 300 {
                return Err(
                    WeatherboardError::config("Weather API timeout cannot exceed 300 seconds")
                        .into(),
                );
            }
        }

        if self.server.port == 0 {
            return Err(WeatherboardError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherboardError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

/// Read `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing file yields no variables.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open dotenv file: {}", path.display()))?
        .map(|item| {
            item.with_context(|| format!("Failed to parse dotenv file: {}", path.display()))
        })
        .collect()
}
