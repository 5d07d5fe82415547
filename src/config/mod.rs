// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[gallery]` - Lazy loading, metadata captions, layout selection
//! - `[lightbox]` - Swipe tuning and re-entry behavior
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_FOLIO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_folio::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.gallery.enable_lazy_loading = false;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::layout::{AspectRatio, Columns, GridLayoutConfig, Spacing};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "IcedFolio";
const CONFIG_FILE: &str = "settings.toml";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_FOLIO_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Gallery grid settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Defer thumbnails until they approach the viewport.
    #[serde(default = "default_true")]
    pub enable_lazy_loading: bool,

    /// Draw the title/metadata band under each cell.
    #[serde(default)]
    pub show_metadata: bool,

    /// Pick the grid preset from the collection's content.
    #[serde(default = "default_true")]
    pub adaptive_layout: bool,

    /// Leading items revealed immediately when lazy loading is on.
    #[serde(default = "default_eager_count")]
    pub eager_count: usize,

    /// Columns used when `adaptive_layout` is off.
    #[serde(default)]
    pub columns: Columns,

    /// Cell ratio used when `adaptive_layout` is off ("auto" or "w/h").
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,

    /// Gap used when `adaptive_layout` is off.
    #[serde(default)]
    pub spacing: Spacing,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            enable_lazy_loading: true,
            show_metadata: false,
            adaptive_layout: true,
            eager_count: DEFAULT_EAGER_COUNT,
            columns: Columns::default(),
            aspect_ratio: default_aspect_ratio(),
            spacing: Spacing::default(),
        }
    }
}

impl GalleryConfig {
    /// The layout used when the content heuristic is disabled.
    ///
    /// An unparsable `aspect_ratio` falls back to `auto`.
    #[must_use]
    pub fn fixed_layout(&self) -> GridLayoutConfig {
        let ratio = self.aspect_ratio.parse().unwrap_or(AspectRatio::Auto);
        GridLayoutConfig::fixed(self.columns, ratio, self.spacing)
    }
}

/// Lightbox settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    /// Minimum horizontal travel for a swipe to navigate (px).
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f32,

    /// Swipes slower than this are ignored (ms).
    #[serde(default = "default_swipe_duration")]
    pub swipe_max_duration_ms: u64,

    /// Resume at the last viewed item when the lightbox is reopened.
    #[serde(default)]
    pub remember_last_index: bool,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            swipe_max_duration_ms: DEFAULT_SWIPE_MAX_DURATION_MS,
            remember_last_index: false,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub lightbox: LightboxConfig,
}

impl Config {
    /// Returns a copy with every numeric value clamped to its valid range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.gallery.eager_count = self.gallery.eager_count.min(MAX_EAGER_COUNT);
        self.gallery.columns = self.gallery.columns.sanitized();
        self.lightbox.swipe_threshold_px = if self.lightbox.swipe_threshold_px.is_finite() {
            self.lightbox
                .swipe_threshold_px
                .clamp(MIN_SWIPE_THRESHOLD_PX, MAX_SWIPE_THRESHOLD_PX)
        } else {
            DEFAULT_SWIPE_THRESHOLD_PX
        };
        self.lightbox.swipe_max_duration_ms = self
            .lightbox
            .swipe_max_duration_ms
            .clamp(MIN_SWIPE_MAX_DURATION_MS, MAX_SWIPE_MAX_DURATION_MS);
        self
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_eager_count() -> usize {
    DEFAULT_EAGER_COUNT
}

fn default_aspect_ratio() -> String {
    AspectRatio::Auto.to_string()
}

fn default_swipe_threshold() -> f32 {
    DEFAULT_SWIPE_THRESHOLD_PX
}

fn default_swipe_duration() -> u64 {
    DEFAULT_SWIPE_MAX_DURATION_MS
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the application config directory with an optional override.
///
/// # Resolution Order
///
/// 1. `override_path` parameter (if `Some`)
/// 2. `ICED_FOLIO_CONFIG_DIR` environment variable (if set and non-empty)
/// 3. Platform-specific config directory (with app name appended)
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
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
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(_) => (
                    Config::default(),
                    Some("notification-config-load-error".to_string()),
                ),
            };
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path, clamping out-of-range values.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config.sanitized())
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config("no config directory available".to_string())),
    }
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
