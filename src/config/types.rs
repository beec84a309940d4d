//! Configuration type definitions.

use super::enums::ColorSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing-related settings.
///
/// Controls the starting values of the drawing controls; users change them
/// at runtime through the controls themselves.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Initial pen color - a named color, a `#rrggbb` hex string, or an RGB
    /// array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial stroke width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: f64,

    /// Initial text stamp size in pixels (valid range: 8.0 - 128.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for text stamps (e.g., "DejaVu Sans", "Liberation Serif")
    /// Falls back to the system sans-serif face if unavailable
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_stroke_width: default_stroke_width(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
        }
    }
}

/// Surface geometry and background.
#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Surface height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Background color; also what the eraser and the clear control paint with
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

/// Discrete color swatches offered next to the continuous picker.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Swatch colors, in display order
    #[serde(default = "default_swatches")]
    pub swatches: Vec<ColorSpec>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            swatches: default_swatches(),
        }
    }
}

/// Export target settings.
///
/// The export filename is fixed (`drawing.png`); only the directory is
/// configurable.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written to; defaults to a "Sketchboard" folder
    /// under the user's pictures directory
    #[serde(default = "crate::export::default_directory")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: crate::export::default_directory(),
        }
    }
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_stroke_width() -> f64 {
    5.0
}

fn default_font_size() -> f64 {
    32.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_swatches() -> Vec<ColorSpec> {
    [
        "#1abc9c", "#3498db", "#9b59b6", "#f1c40f", "#e67e22", "#e74c3c", "#ecf0f1", "#95a5a6",
        "#34495e", "#000000",
    ]
    .iter()
    .map(|hex| ColorSpec::Name((*hex).to_string()))
    .collect()
}
