//! The interaction state machine: translates pointer and control events into
//! session mutations and surface commands.

use std::path::{Path, PathBuf};

use super::events::{Modality, PointerEvent, SurfaceBounds, extract_point};
use super::session::{DrawingSession, ToolMode};
use crate::draw::{Color, Surface, SurfaceError, TextError, TextStamper};
use crate::export::{self, ExportError};
use crate::util::{Point, color_to_name};

/// Single authority over the drawing session and its surface.
///
/// Every recognized input event or control change maps to exactly one method
/// here; each call either mutates the [`DrawingSession`] or issues an
/// immediate-mode command against the [`Surface`]. Handlers run to completion
/// in event-arrival order — there is no batching and no retry, surface calls
/// are treated as always succeeding by platform contract.
pub struct SurfaceController {
    session: DrawingSession,
    surface: Surface,
    bounds: SurfaceBounds,
    font_family: String,
    /// Lazily created on the first non-empty text stamp
    stamper: Option<TextStamper>,
}

impl SurfaceController {
    /// Creates a controller with a fresh surface filled with `background`.
    ///
    /// `bounds` is the surface's placement within the client coordinate
    /// space; it is re-captured on every resize.
    pub fn new(
        width: u32,
        height: u32,
        background: Color,
        color: Color,
        stroke_width: f64,
        font_size: f64,
        font_family: String,
        modality: Modality,
        bounds: SurfaceBounds,
    ) -> Result<Self, SurfaceError> {
        let surface = Surface::new(width, height, background)?;
        log::info!(
            "Surface ready: {width}x{height}, {:?} input, {} pen",
            modality,
            color_to_name(&color)
        );
        Ok(Self {
            session: DrawingSession::new(color, stroke_width, font_size, modality),
            surface,
            bounds,
            font_family,
            stamper: None,
        })
    }

    /// Read access to the session state.
    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    /// Read access to the surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The label the mode-toggle control currently shows.
    pub fn mode_label(&self) -> &'static str {
        self.session.mode_label()
    }

    /// The value the continuous color picker control displays, kept in sync
    /// with swatch selections.
    pub fn picker_value(&self) -> String {
        self.session.active_color.to_hex()
    }

    fn normalize(&self, event: &PointerEvent) -> Option<Point> {
        let point = extract_point(event, self.session.modality(), self.bounds);
        if point.is_none() {
            log::debug!(
                "Dropping pointer event not matching {:?} modality",
                self.session.modality()
            );
        }
        point
    }

    /// Pointer down: begins a new path at the event position.
    ///
    /// A second down before an up simply restarts the path silently.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        let Some(point) = self.normalize(event) else {
            return;
        };
        self.session.is_pointer_down = true;
        self.session.last_point = Some(point);
    }

    /// Pointer move: commits a segment while a stroke is active, otherwise
    /// only tracks the hover anchor.
    ///
    /// Segments are committed immediately, one per event; a width or color
    /// change between events therefore applies to subsequent segments only.
    /// While Fill mode is active the state machine runs identically but no
    /// pixels are committed.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        let Some(point) = self.normalize(event) else {
            return;
        };

        if !self.session.is_pointer_down {
            self.session.hover_anchor = Some(point);
            return;
        }

        if self.session.tool_mode == ToolMode::Draw
            && let Some(last) = self.session.last_point
        {
            self.surface.stroke_segment(
                last,
                point,
                self.session.active_color,
                self.session.stroke_width,
            );
        }
        self.session.last_point = Some(point);
    }

    /// Pointer up: terminates the current path. Pixels stay as committed.
    pub fn on_pointer_up(&mut self) {
        self.session.is_pointer_down = false;
        self.session.last_point = None;
    }

    /// Surface tap: flat-fills the whole surface when Fill mode is active.
    /// In Draw mode a tap has no effect of its own.
    pub fn on_surface_tap(&mut self) {
        if self.session.tool_mode == ToolMode::Fill {
            self.surface.fill_all(self.session.active_color);
            log::debug!(
                "Filled surface with {}",
                color_to_name(&self.session.active_color)
            );
        }
    }

    /// Flips the primary tool between Draw and Fill.
    pub fn on_tool_mode_toggle(&mut self) {
        self.session.tool_mode = match self.session.tool_mode {
            ToolMode::Draw => ToolMode::Fill,
            ToolMode::Fill => ToolMode::Draw,
        };
        log::debug!(
            "Tool mode now {:?}, control labeled '{}'",
            self.session.tool_mode,
            self.session.mode_label()
        );
    }

    /// Stroke-width control change; affects subsequent segments only.
    pub fn on_stroke_width_change(&mut self, value: f64) {
        self.session.set_stroke_width(value);
    }

    /// Font-size control change; affects subsequent stamps only.
    pub fn on_font_size_change(&mut self, value: f64) {
        self.session.set_font_size(value);
    }

    /// Continuous color picker change.
    pub fn on_color_change(&mut self, color: Color) {
        self.session.set_active_color(color);
    }

    /// Palette swatch click: same effect as the picker, and the picker's
    /// displayed value follows along (see [`Self::picker_value`]).
    pub fn on_palette_swatch_click(&mut self, color: Color) {
        self.session.set_active_color(color);
        log::debug!("Swatch selected, picker synced to {}", self.picker_value());
    }

    /// Eraser control: aliases the stroke color to the background color and
    /// forces Draw mode. Existing pixels are untouched — only what future
    /// strokes paint with changes.
    pub fn on_eraser_activate(&mut self) {
        self.session.active_color = self.surface.background();
        self.session.is_erasing = true;
        self.session.tool_mode = ToolMode::Draw;
        log::debug!("Eraser active, control labeled '{}'", self.mode_label());
    }

    /// Clears the whole surface to the background color, unconditionally.
    /// No session attribute changes.
    pub fn on_clear_surface(&mut self) {
        let background = self.surface.background();
        self.surface.fill_all(background);
    }

    /// Updates the pending stamp text held by the text field control.
    pub fn on_text_input_change(&mut self, text: String) {
        self.session.pending_text = text;
    }

    /// Stamp trigger (double-activation on desktop, first-touch on mobile):
    /// commits the pending text at the event position.
    pub fn on_text_stamp(&mut self, event: &PointerEvent) -> Result<(), TextError> {
        let Some(point) = self.normalize(event) else {
            return Ok(());
        };
        let text = self.session.pending_text.clone();
        self.on_text_commit(point, &text)
    }

    /// Stamps `text` at `point` using the current font size and color.
    ///
    /// Empty text is a silent no-op, not an error. Stroke width is never
    /// applied to text.
    pub fn on_text_commit(&mut self, point: Point, text: &str) -> Result<(), TextError> {
        if text.is_empty() {
            return Ok(());
        }

        let stamper = match &mut self.stamper {
            Some(stamper) => stamper,
            vacant => {
                let stamper = vacant.insert(TextStamper::from_system(&self.font_family)?);
                log::debug!("Text stamper ready for family '{}'", stamper.family());
                stamper
            }
        };
        stamper.stamp(
            self.surface.pixmap_mut(),
            point,
            text,
            self.session.font_size,
            self.session.active_color,
        );
        Ok(())
    }

    /// Decodes image bytes and composites them scaled to the full surface,
    /// over whatever currently occupies it.
    ///
    /// # Errors
    /// Decode failure propagates unrecovered; there is no alternate image
    /// and no retry.
    pub fn on_background_image_load(&mut self, bytes: &[u8]) -> Result<(), SurfaceError> {
        self.surface.draw_image_bytes(bytes)
    }

    /// Encodes the current pixel buffer as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.encode_png()
    }

    /// Export request: serializes the pixel buffer and writes it under the
    /// fixed export filename in `directory`.
    pub fn on_export_request(&self, directory: &Path) -> Result<PathBuf, ExportError> {
        let png = self.export_png()?;
        export::save_drawing(&png, directory)
    }

    /// Rebinds the surface to a new layout size and placement.
    ///
    /// The pixel buffer is reallocated (contents reset to the background
    /// color) and any partially-drawn path is invalidated.
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        bounds: SurfaceBounds,
    ) -> Result<(), SurfaceError> {
        self.surface.resize(width, height)?;
        self.bounds = bounds;
        self.session.is_pointer_down = false;
        self.session.last_point = None;
        self.session.hover_anchor = None;
        log::debug!("Surface rebound to {width}x{height}");
        Ok(())
    }
}
