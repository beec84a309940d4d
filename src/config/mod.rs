//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/sketchboard/config.toml`.
//! Settings include drawing defaults, surface geometry, the palette, and the
//! export target.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{DrawingConfig, ExportConfig, PaletteConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_stroke_width = 5.0
/// default_font_size = 32.0
///
/// [surface]
/// width = 800
/// height = 600
/// background = "white"
///
/// [export]
/// directory = "/home/me/Pictures/Sketchboard"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing control defaults (color, stroke width, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Surface geometry and background color
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Palette swatch colors
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Export target settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: 1.0 - 50.0
    /// - `default_font_size`: 8.0 - 128.0
    /// - surface `width`/`height`: 1 - 8192
    fn validate_and_clamp(&mut self) {
        if !(1.0..=50.0).contains(&self.drawing.default_stroke_width) {
            log::warn!(
                "Invalid default_stroke_width {:.1}, clamping to 1.0-50.0 range",
                self.drawing.default_stroke_width
            );
            self.drawing.default_stroke_width = self.drawing.default_stroke_width.clamp(1.0, 50.0);
        }

        if !(8.0..=128.0).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to 8.0-128.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(8.0, 128.0);
        }

        if !(1..=8192).contains(&self.surface.width) {
            log::warn!(
                "Invalid surface width {}, clamping to 1-8192 range",
                self.surface.width
            );
            self.surface.width = self.surface.width.clamp(1, 8192);
        }

        if !(1..=8192).contains(&self.surface.height) {
            log::warn!(
                "Invalid surface height {}, clamping to 1-8192 range",
                self.surface.height
            );
            self.surface.height = self.surface.height.clamp(1, 8192);
        }

        if self.palette.swatches.is_empty() {
            log::warn!("Empty palette, restoring default swatches");
            self.palette = PaletteConfig::default();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses configuration from a TOML string, with validation.
    ///
    /// Used by the trace replay CLI to accept a config file at an explicit
    /// path instead of the default location.
    pub fn from_toml(config_str: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Serializes the config to TOML format and writes it to
    /// `~/.config/sketchboard/config.toml`. Creates the parent directory if
    /// it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.surface.background.to_color(), WHITE);
        assert_eq!(config.surface.width, 800);
        assert_eq!(config.palette.swatches.len(), 10);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml(
            r#"
            [drawing]
            default_stroke_width = 900.0
            default_font_size = 1.0

            [surface]
            width = 0
            height = 100000
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.default_stroke_width, 50.0);
        assert_eq!(config.drawing.default_font_size, 8.0);
        assert_eq!(config.surface.width, 1);
        assert_eq!(config.surface.height, 8192);
    }

    #[test]
    fn empty_palette_is_restored() {
        let config = Config::from_toml("[palette]\nswatches = []\n").unwrap();
        assert_eq!(config.palette.swatches.len(), 10);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[drawing\nbroken").is_err());
    }
}
