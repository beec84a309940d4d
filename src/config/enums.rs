//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - either a named/hex color string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex color, as the picker control delivers it
/// default_color = "#ff8000"
///
/// # Custom RGB color (0-255 per component)
/// background = [255, 255, 255]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, white, black)
    /// or a `#rrggbb` hex string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors are resolved through `util::parse_color` (names first,
    /// then hex). Unknown strings default to black with a warning. RGB
    /// arrays are converted from 0-255 range to 0.0-1.0 with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_spec_resolves_all_forms() {
        assert_eq!(ColorSpec::Name("red".into()).to_color(), RED);
        assert_eq!(ColorSpec::Name("#00ff00".into()).to_color(), GREEN);
        assert_eq!(ColorSpec::Rgb([255, 255, 255]).to_color(), WHITE);
        assert_eq!(ColorSpec::Name("mystery".into()).to_color(), BLACK);
    }

    #[test]
    fn color_spec_round_trips_through_toml() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            c: ColorSpec,
        }

        for raw in ["c = \"red\"", "c = \"#0000ff\"", "c = [1, 2, 3]"] {
            let parsed: Wrapper = toml::from_str(raw).unwrap();
            let emitted = toml::to_string(&parsed).unwrap();
            let reparsed: Wrapper = toml::from_str(&emitted).unwrap();
            assert_eq!(parsed.c.to_color(), reparsed.c.to_color());
        }
    }
}
