//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::APP_NAME;
use crate::models::{MAX_GRID_CELLS, MAX_SPEED_MS, MIN_SPEED_MS};
use crate::transit::TimePolicy;

/// Environment variable that overrides `transit.api_key`.
pub const API_KEY_ENV: &str = "METROLINX_API_KEY";

/// Default departure provider endpoint.
pub const DEFAULT_BASE_URL: &str =
    "https://api.openmetrolinx.com/OpenDataAPI/api/V1/ServiceUpdate/UnionDepartures/All";

/// Editor defaults for new projects and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid rows for new projects.
    pub rows: usize,
    /// Grid columns for new projects.
    pub cols: usize,
    /// Playback delay used when a project does not store one.
    pub default_speed_ms: u32,
    /// Values per line in exported animation headers.
    pub values_per_line: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rows: 64,
            cols: 48,
            default_speed_ms: 150,
            values_per_line: 12,
        }
    }
}

/// Departure provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    /// Provider endpoint, without query string.
    pub base_url: String,
    /// Provider key. [`API_KEY_ENV`] takes precedence.
    pub api_key: Option<String>,
    /// Outbound request timeout.
    pub timeout_secs: u64,
    /// Departures returned when a request gives no limit.
    pub default_limit: usize,
    /// Drop departures with unparseable times instead of failing.
    pub skip_invalid_times: bool,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 10,
            default_limit: crate::transit::DEFAULT_LIMIT,
            skip_invalid_times: false,
        }
    }
}

impl TransitConfig {
    /// Returns the API key, preferring the environment over the file.
    ///
    /// Blank values count as unset, so a blank environment variable falls
    /// back to the file.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_key: Option<String>) -> Option<String> {
        let usable = |key: &String| !key.trim().is_empty();
        env_key
            .filter(usable)
            .or_else(|| self.api_key.clone().filter(usable))
    }

    /// Time policy selected by `skip_invalid_times`.
    #[must_use]
    pub const fn time_policy(&self) -> TimePolicy {
        TimePolicy::from_skip_flag(self.skip_invalid_times)
    }
}

/// Bind address for the departure service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Bubu/config.toml`
/// - macOS: `~/Library/Application Support/Bubu/config.toml`
/// - Windows: `%APPDATA%\Bubu\config.toml`
///
/// Missing sections and keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Editor defaults
    pub editor: EditorConfig,
    /// Departure provider
    pub transit: TransitConfig,
    /// Service bind address
    pub server: ServerConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - grid dimensions are non-zero
    /// - default speed lies in the playback range
    /// - `values_per_line` is non-zero
    /// - the provider URL is http(s)
    pub fn validate(&self) -> Result<()> {
        let editor = &self.editor;
        if editor.rows == 0 || editor.cols == 0 {
            anyhow::bail!(
                "editor grid must be at least 1x1, got {}x{}",
                editor.rows,
                editor.cols
            );
        }

        if editor
            .rows
            .checked_mul(editor.cols)
            .is_none_or(|cells| cells > MAX_GRID_CELLS)
        {
            anyhow::bail!(
                "editor grid {}x{} exceeds {} cells",
                editor.rows,
                editor.cols,
                MAX_GRID_CELLS
            );
        }

        if !(MIN_SPEED_MS..=MAX_SPEED_MS).contains(&editor.default_speed_ms) {
            anyhow::bail!(
                "editor.default_speed_ms must be between {} and {}, got {}",
                MIN_SPEED_MS,
                MAX_SPEED_MS,
                editor.default_speed_ms
            );
        }

        if editor.values_per_line == 0 {
            anyhow::bail!("editor.values_per_line must be at least 1");
        }

        let url = &self.transit.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("transit.base_url must start with http:// or https://, got '{url}'");
        }

        if self.transit.timeout_secs == 0 {
            anyhow::bail!("transit.timeout_secs must be at least 1");
        }

        Ok(())
    }
}
