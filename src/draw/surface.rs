//! The raster surface: a pixel buffer with immediate-mode drawing commands.

use super::color::Color;
use crate::util::Point;
use thiserror::Error;
use tiny_skia::{
    IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Errors raised by surface operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The requested pixel dimensions cannot back a pixmap.
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Background image bytes could not be decoded.
    #[error("failed to decode background image: {0}")]
    Decode(#[from] image::ImageError),

    /// The pixel buffer could not be encoded as PNG.
    #[error("failed to encode surface as PNG: {0}")]
    Encode(String),
}

/// An offscreen 2D raster surface.
///
/// Wraps a tiny-skia pixmap and exposes exactly the drawing commands the
/// interaction controller issues: stroke a line segment, fill everything with
/// a flat color, composite a decoded image scaled to the full surface, and
/// encode the pixel buffer as PNG. Rendering is immediate-mode; every call
/// commits pixels before returning.
pub struct Surface {
    pixmap: Pixmap,
    background: Color,
}

impl Surface {
    /// Creates a surface of the given size, filled with the background color.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, SurfaceError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        pixmap.fill(background.to_skia());
        Ok(Self { pixmap, background })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The background color the surface was created with.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Strokes a single line segment with round caps and joins.
    ///
    /// Degenerate segments (zero length) are skipped; they would not change
    /// any pixels and tiny-skia rejects empty paths anyway.
    pub fn stroke_segment(&mut self, from: Point, to: Point, color: Color, width: f64) {
        if from == to || width <= 0.0 {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Fills the entire surface with a flat color.
    pub fn fill_all(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    /// Reallocates the pixel buffer at a new size.
    ///
    /// The previous contents are discarded and the new buffer is filled with
    /// the background color; callers are expected to drop any in-flight path
    /// state alongside this.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        pixmap.fill(self.background.to_skia());
        self.pixmap = pixmap;
        Ok(())
    }

    /// Decodes image bytes and draws the result scaled to exactly fill the
    /// surface, discarding aspect ratio.
    ///
    /// The image lands over whatever currently occupies the surface.
    ///
    /// # Errors
    /// [`SurfaceError::Decode`] if the bytes are not a decodable image.
    pub fn draw_image_bytes(&mut self, bytes: &[u8]) -> Result<(), SurfaceError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (iw, ih) = decoded.dimensions();
        log::debug!(
            "Decoded background image: {}x{} -> scaling to {}x{}",
            iw,
            ih,
            self.width(),
            self.height()
        );

        let source = pixmap_from_rgba(iw, ih, decoded.into_raw())
            .ok_or(SurfaceError::InvalidDimensions { width: iw, height: ih })?;

        let sx = self.width() as f32 / iw as f32;
        let sy = self.height() as f32 / ih as f32;
        let paint = PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_scale(sx, sy),
            None,
        );
        Ok(())
    }

    /// Encodes the current pixel buffer as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap
            .encode_png()
            .map_err(|err| SurfaceError::Encode(err.to_string()))
    }

    /// Reads back a single pixel as an unpremultiplied color.
    ///
    /// Returns `None` outside the surface. Intended for tests and probes, not
    /// for bulk pixel access.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color {
            r: px.red() as f64 / 255.0,
            g: px.green() as f64 / 255.0,
            b: px.blue() as f64 / 255.0,
            a: px.alpha() as f64 / 255.0,
        })
    }

    /// Mutable access to the backing pixmap for glyph rasterization.
    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

/// Builds a pixmap from straight (unpremultiplied) RGBA bytes.
///
/// tiny-skia stores premultiplied pixels, so each component is scaled by its
/// alpha before the buffer is handed over.
fn pixmap_from_rgba(width: u32, height: u32, mut rgba: Vec<u8>) -> Option<Pixmap> {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a < 255 {
            px[0] = ((px[0] as u16 * a) / 255) as u8;
            px[1] = ((px[1] as u16 * a) / 255) as u8;
            px[2] = ((px[2] as u16 * a) / 255) as u8;
        }
    }
    Pixmap::from_vec(rgba, IntSize::from_wh(width, height)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};

    #[test]
    fn new_surface_is_filled_with_background() {
        let surface = Surface::new(4, 4, WHITE).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(surface.pixel(x, y).unwrap(), WHITE);
            }
        }
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert!(matches!(
            Surface::new(0, 10, WHITE),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn stroke_segment_commits_pixels_along_the_line() {
        let mut surface = Surface::new(20, 20, WHITE).unwrap();
        surface.stroke_segment(Point::new(2.0, 10.0), Point::new(18.0, 10.0), BLACK, 4.0);
        let mid = surface.pixel(10, 10).unwrap();
        assert!(mid.r < 0.5 && mid.g < 0.5 && mid.b < 0.5);
        // Far corner untouched
        assert_eq!(surface.pixel(0, 0).unwrap(), WHITE);
    }

    #[test]
    fn degenerate_segment_changes_nothing() {
        let mut surface = Surface::new(8, 8, WHITE).unwrap();
        surface.stroke_segment(Point::new(4.0, 4.0), Point::new(4.0, 4.0), BLACK, 6.0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(surface.pixel(x, y).unwrap(), WHITE);
            }
        }
    }

    #[test]
    fn fill_all_replaces_every_pixel() {
        let mut surface = Surface::new(6, 6, WHITE).unwrap();
        surface.stroke_segment(Point::new(0.0, 0.0), Point::new(6.0, 6.0), BLACK, 2.0);
        surface.fill_all(BLACK);
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(surface.pixel(x, y).unwrap(), BLACK);
            }
        }
    }

    #[test]
    fn resize_discards_contents_and_restores_background() {
        let mut surface = Surface::new(10, 10, WHITE).unwrap();
        surface.fill_all(BLACK);
        surface.resize(5, 7).unwrap();
        assert_eq!(surface.width(), 5);
        assert_eq!(surface.height(), 7);
        assert_eq!(surface.pixel(2, 3).unwrap(), WHITE);
    }

    #[test]
    fn draw_image_bytes_rejects_garbage() {
        let mut surface = Surface::new(10, 10, WHITE).unwrap();
        assert!(matches!(
            surface.draw_image_bytes(b"definitely not an image"),
            Err(SurfaceError::Decode(_))
        ));
    }

    #[test]
    fn draw_image_bytes_scales_to_full_surface() {
        // 1x1 black PNG scaled up must cover the whole surface.
        let source = Surface::new(1, 1, BLACK).unwrap();
        let png = source.encode_png().unwrap();

        let mut surface = Surface::new(9, 5, WHITE).unwrap();
        surface.draw_image_bytes(&png).unwrap();
        assert_eq!(surface.pixel(0, 0).unwrap(), BLACK);
        assert_eq!(surface.pixel(8, 4).unwrap(), BLACK);
    }

    #[test]
    fn encode_png_round_trips_through_decode() {
        let mut surface = Surface::new(3, 3, WHITE).unwrap();
        surface.fill_all(BLACK);
        let png = surface.encode_png().unwrap();

        let mut other = Surface::new(3, 3, WHITE).unwrap();
        other.draw_image_bytes(&png).unwrap();
        assert_eq!(other.pixel(1, 1).unwrap(), BLACK);
    }
}
