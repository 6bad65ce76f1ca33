//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The visible window used at startup
//! - Titles for new and untitled events
//!
//! Configuration is stored at `~/.config/timeline-editor/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::edit::{format_time, parse_time};
use crate::error::{ConfigError, CoreError, Result};
use crate::timeline::{TimeWindow, DEFAULT_END, DEFAULT_START, DEFAULT_STEP, MINUTES_PER_DAY};

/// Startup window, times as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_step")]
    pub step: i32,
}

/// Event defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_title")]
    pub default_title: String,
    #[serde(default = "default_placeholder")]
    pub placeholder_title: String,
    /// Start with one sample event on Monday 11:00-11:30.
    #[serde(default = "default_true")]
    pub seed_sample_event: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timeline-editor/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

fn default_start() -> String {
    format_time(DEFAULT_START)
}
fn default_end() -> String {
    format_time(DEFAULT_END)
}
fn default_step() -> i32 {
    DEFAULT_STEP
}
fn default_title() -> String {
    "New event".into()
}
fn default_placeholder() -> String {
    "Untitled".into()
}
fn default_true() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            step: default_step(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            placeholder_title: default_placeholder(),
            seed_sample_event: true,
        }
    }
}

impl Config {
    /// Build the startup window. Bounds are clamped the same way picker edits
    /// are, so `start` past `end` yields a one-step window.
    ///
    /// # Errors
    /// Returns an error if a time is malformed or `step` does not fit a day.
    pub fn time_window(&self) -> Result<TimeWindow> {
        let start = parse_time(&self.window.start)?;
        let end = parse_time(&self.window.end)?;
        let mut window = TimeWindow::new(0, MINUTES_PER_DAY, self.window.step)?;
        window.set_start(start);
        window.set_end(end);
        Ok(window)
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Get a config value as string by dot-separated key, e.g. `window.start`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = key
            .split('.')
            .try_fold(&json, |node, part| node.get(part))?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The value is parsed to the
    /// type of the existing entry, and the result must still describe a
    /// valid window. Nothing is written to disk.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not fit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        let slot = key
            .split('.')
            .try_fold(&mut json, |node, part| node.get_mut(part))
            .filter(|v| !v.is_object())
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let new_value = match &*slot {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<i64>()
                    .map_err(|e| invalid(e.to_string()))?
                    .into(),
            ),
            _ => serde_json::Value::String(value.to_string()),
        };
        *slot = new_value;

        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.time_window().map_err(|e| match e {
            CoreError::Parse(p) => invalid(p.to_string()),
            CoreError::Validation(v) => invalid(v.to_string()),
            other => invalid(other.to_string()),
        })?;
        *self = updated;
        Ok(())
    }
}
