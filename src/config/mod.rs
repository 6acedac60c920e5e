// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! store tunables to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[toasts]` - Active toast limit and removal delay
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOAST_STORE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_store::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.toasts.max_visible = Some(3);
//! config::save(&config).expect("Failed to save config");
//!
//! let store_config = config.store_config();
//! assert_eq!(store_config.limit.value(), 3);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::toast::{RemovalDelay, ToastLimit};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastStore";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_STORE_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Toast store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastsConfig {
    /// Maximum number of active toasts.
    #[serde(
        default = "default_max_visible",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_visible: Option<usize>,

    /// Delay between dismissal and removal, in milliseconds.
    #[serde(
        default = "default_removal_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub removal_delay_ms: Option<u64>,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            removal_delay_ms: default_removal_delay_ms(),
        }
    }
}

/// Root configuration persisted to `settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub toasts: ToastsConfig,
}

impl Config {
    /// Resolves the persisted values into validated store tunables.
    ///
    /// Missing values fall back to defaults, out-of-range values are clamped.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            limit: self
                .toasts
                .max_visible
                .map_or_else(ToastLimit::default, ToastLimit::new),
            removal_delay: self
                .toasts
                .removal_delay_ms
                .map_or_else(RemovalDelay::default, RemovalDelay::from_millis),
        }
    }
}

/// Validated tunables consumed by [`NotificationStore`](crate::notifications::NotificationStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of active toasts.
    pub limit: ToastLimit,
    /// Delay between dismissal and removal.
    pub removal_delay: RemovalDelay,
}

impl StoreConfig {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = ToastLimit::new(limit);
        self
    }

    #[must_use]
    pub fn with_removal_delay_ms(mut self, millis: u64) -> Self {
        self.removal_delay = RemovalDelay::from_millis(millis);
        self
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_visible() -> Option<usize> {
    Some(DEFAULT_MAX_TOASTS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_removal_delay_ms() -> Option<u64> {
    Some(DEFAULT_REMOVAL_DELAY_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring the override and then the environment.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
