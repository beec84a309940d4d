//! Per-session drawing state.

use super::events::Modality;
use crate::draw::Color;
use crate::util::Point;

/// The primary tool, governing what a surface tap does.
///
/// Exactly one mode is active at a time. While Fill is active, pointer drags
/// do not paint; only the tap handler is live (the two mechanisms are
/// mutually exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Freehand stroke capture (default)
    #[default]
    Draw,
    /// Tap fills the whole surface with the active color
    Fill,
}

/// The mutable interaction state owned by the controller.
///
/// Created once at startup and lives for the controller's whole lifetime.
/// Handlers mutate it; nothing here is ever serialized — the only artifact
/// the session produces is the surface's pixel buffer.
#[derive(Debug)]
pub struct DrawingSession {
    /// Current primary tool
    pub tool_mode: ToolMode,
    /// Whether strokes currently paint with the background color
    pub is_erasing: bool,
    /// Whether a stroke is actively being captured (between down and up)
    pub is_pointer_down: bool,
    /// Line thickness for subsequent stroke segments, always > 0
    pub stroke_width: f64,
    /// Text stamp size, always > 0
    pub font_size: f64,
    /// Stroke/fill color for subsequent operations
    pub active_color: Color,
    /// Last committed path coordinate; None outside an active stroke
    pub last_point: Option<Point>,
    /// Pointer position tracked while no stroke is active, so the next
    /// down event starts from a sane anchor
    pub hover_anchor: Option<Point>,
    /// Text the next stamp trigger will commit
    pub pending_text: String,
    /// Input modality, classified once at startup
    modality: Modality,
}

impl DrawingSession {
    /// Creates a session with the given drawing defaults.
    pub fn new(color: Color, stroke_width: f64, font_size: f64, modality: Modality) -> Self {
        Self {
            tool_mode: ToolMode::Draw,
            is_erasing: false,
            is_pointer_down: false,
            stroke_width,
            font_size,
            active_color: color,
            last_point: None,
            hover_anchor: None,
            pending_text: String::new(),
            modality,
        }
    }

    /// The input modality. Immutable after startup.
    pub fn modality(&self) -> Modality {
        self.modality
    }

    /// The label the mode-toggle control shows: the action a click performs
    /// next, not the current state.
    pub fn mode_label(&self) -> &'static str {
        match self.tool_mode {
            ToolMode::Draw => "Fill",
            ToolMode::Fill => "Draw",
        }
    }

    /// Sets the stroke width for subsequent segments.
    ///
    /// Non-positive values violate the session invariant and are ignored
    /// with a warning; the controls are expected to deliver valid numbers.
    pub fn set_stroke_width(&mut self, value: f64) {
        if value <= 0.0 || !value.is_finite() {
            log::warn!("Ignoring non-positive stroke width {value}");
            return;
        }
        self.stroke_width = value;
    }

    /// Sets the text stamp size; same validity rule as stroke width.
    pub fn set_font_size(&mut self, value: f64) {
        if value <= 0.0 || !value.is_finite() {
            log::warn!("Ignoring non-positive font size {value}");
            return;
        }
        self.font_size = value;
    }

    /// Selects a color, ending any eraser aliasing.
    pub fn set_active_color(&mut self, color: Color) {
        self.active_color = color;
        self.is_erasing = false;
    }
}
