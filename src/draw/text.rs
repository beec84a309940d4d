//! Text stamping: system font lookup and glyph rasterization.

use super::color::Color;
use crate::util::Point;
use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont};
use thiserror::Error;
use tiny_skia::Pixmap;

/// Errors raised while preparing or rasterizing text.
#[derive(Debug, Error)]
pub enum TextError {
    /// The font database produced no face for the requested family.
    #[error("no usable font found for family '{family}'")]
    FontNotFound { family: String },

    /// A located face could not be parsed.
    #[error("failed to parse font data: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
}

/// Renders single-line text stamps onto a pixmap.
///
/// The face is located once through the system font database and kept parsed
/// for the stamper's lifetime. Layout is a plain left-to-right advance with
/// pair kerning; the stamp origin is the baseline start, matching the
/// platform text API the original surface exposed.
pub struct TextStamper {
    font: FontVec,
    family: String,
}

impl TextStamper {
    /// Locates a face for `family` in the system font database.
    ///
    /// "sans-serif" (or an unavailable family) falls back to the database's
    /// generic sans-serif face.
    ///
    /// # Errors
    /// [`TextError::FontNotFound`] when the database has no match at all,
    /// [`TextError::InvalidFont`] when the face data cannot be parsed.
    pub fn from_system(family: &str) -> Result<Self, TextError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let mut families = Vec::new();
        if !family.eq_ignore_ascii_case("sans-serif") && !family.eq_ignore_ascii_case("sans") {
            families.push(fontdb::Family::Name(family));
        }
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };
        let id = db.query(&query).ok_or_else(|| TextError::FontNotFound {
            family: family.to_string(),
        })?;

        let parsed = db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index)
            })
            .ok_or_else(|| TextError::FontNotFound {
                family: family.to_string(),
            })??;

        log::debug!("Loaded font face for family '{family}'");
        Ok(Self {
            font: parsed,
            family: family.to_string(),
        })
    }

    /// The family this stamper was created for.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Fills `text` onto the pixmap with its baseline starting at `origin`.
    ///
    /// Glyphs are filled in `color`; stroke width is deliberately not
    /// consulted (text stamps always render at their natural glyph weight).
    pub fn stamp(&self, pixmap: &mut Pixmap, origin: Point, text: &str, size: f64, color: Color) {
        let scaled = self.font.as_scaled(PxScale::from(size as f32));
        let mut caret_x = origin.x as f32;
        let baseline_y = origin.y as f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }

            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(prev) = previous {
                caret_x += scaled.kern(prev, glyph.id);
            }
            glyph.position = ab_glyph::point(caret_x, baseline_y);
            previous = Some(glyph.id);
            caret_x += scaled.h_advance(glyph.id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let min_x = bounds.min.x as i32;
                let min_y = bounds.min.y as i32;
                outlined.draw(|gx, gy, coverage| {
                    blend_pixel(
                        pixmap,
                        min_x + gx as i32,
                        min_y + gy as i32,
                        color,
                        coverage,
                    );
                });
            }
        }
    }
}

/// Source-over blends one covered pixel into the premultiplied pixel buffer.
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, color: Color, coverage: f32) {
    if coverage <= 0.0 || x < 0 || y < 0 {
        return;
    }
    let (w, h) = (pixmap.width() as i32, pixmap.height() as i32);
    if x >= w || y >= h {
        return;
    }

    let src_a = (color.a as f32 * coverage.min(1.0)).clamp(0.0, 1.0);
    let src_r = color.r as f32 * src_a;
    let src_g = color.g as f32 * src_a;
    let src_b = color.b as f32 * src_a;

    let idx = ((y * w + x) * 4) as usize;
    let data = pixmap.data_mut();
    let inv = 1.0 - src_a;
    data[idx] = ((src_r + data[idx] as f32 / 255.0 * inv) * 255.0).round() as u8;
    data[idx + 1] = ((src_g + data[idx + 1] as f32 / 255.0 * inv) * 255.0).round() as u8;
    data[idx + 2] = ((src_b + data[idx + 2] as f32 / 255.0 * inv) * 255.0).round() as u8;
    data[idx + 3] = ((src_a + data[idx + 3] as f32 / 255.0 * inv) * 255.0).round() as u8;
}
