//! Recorded input-event traces and their replay.
//!
//! A trace is the headless stand-in for the live event stream the drawing
//! surface is normally driven by: a JSON file with a header (surface
//! geometry, platform descriptor) and an ordered list of events in *client*
//! coordinates. Replay feeds events to the controller one at a time, in
//! arrival order — exactly the ordering guarantee the live system has.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::draw::{SurfaceError, TextError};
use crate::export::ExportError;
use crate::input::{Modality, PointerEvent, SurfaceBounds, SurfaceController};
use crate::util::parse_color;

/// Errors raised while reading a trace file.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse trace: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while replaying a trace.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to read background image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Surface geometry recorded in the trace header.
///
/// `left`/`top` are the surface's placement in the client coordinate space
/// (the bounding-box offset pointer events are normalized against).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TraceSurface {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
}

impl TraceSurface {
    fn bounds(&self) -> SurfaceBounds {
        SurfaceBounds {
            left: self.left,
            top: self.top,
        }
    }
}

/// A recorded session: header plus ordered events.
#[derive(Debug, Serialize, Deserialize)]
pub struct Trace {
    /// Platform descriptor used for modality classification; absent means
    /// mouse input
    #[serde(default)]
    pub platform: Option<String>,

    /// Surface geometry; absent means the configured geometry
    #[serde(default)]
    pub surface: Option<TraceSurface>,

    /// Events in arrival order
    pub events: Vec<TraceEvent>,
}

/// One recorded event.
///
/// Pointer-carrying variants flatten the raw event shape, so a mouse trace
/// writes `{"type": "pointer_move", "x": .., "y": ..}` and a touch trace
/// `{"type": "pointer_move", "touches": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    PointerDown {
        #[serde(flatten)]
        pointer: PointerEvent,
    },
    PointerMove {
        #[serde(flatten)]
        pointer: PointerEvent,
    },
    PointerUp,
    SurfaceTap,
    ToolModeToggle,
    StrokeWidth {
        value: f64,
    },
    FontSize {
        value: f64,
    },
    /// Continuous picker change; `value` is a color name or `#rrggbb`
    Color {
        value: String,
    },
    /// Palette swatch click
    PaletteSwatch {
        value: String,
    },
    Eraser,
    Clear,
    /// Text field change: sets the pending stamp text
    TextInput {
        value: String,
    },
    /// Stamp trigger (double-activation / first-touch) at a pointer position
    TextStamp {
        #[serde(flatten)]
        pointer: PointerEvent,
    },
    /// File picker selection; the image is read from `path`
    BackgroundImage {
        path: PathBuf,
    },
    /// Layout resize; omitted `left`/`top` keep the previous placement
    Resize {
        width: u32,
        height: u32,
        #[serde(default)]
        left: Option<f64>,
        #[serde(default)]
        top: Option<f64>,
    },
    /// Export request (fixed filename, configured directory)
    Export,
}

impl Trace {
    /// Reads and parses a trace file.
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let raw = fs::read_to_string(path)?;
        let trace: Trace = serde_json::from_str(&raw)?;
        log::info!(
            "Loaded trace from {} ({} events)",
            path.display(),
            trace.events.len()
        );
        Ok(trace)
    }

    /// The modality this trace was recorded under.
    pub fn modality(&self) -> Modality {
        Modality::classify(self.platform.as_deref().unwrap_or(""))
    }
}

/// Replays a trace through a fresh controller.
///
/// `modality` is classified once before replay and fixed for its duration.
/// Relative background-image paths are resolved against `base_dir` (usually
/// the trace file's directory). Returns the controller in its final state
/// together with the paths of any exports the trace requested.
pub fn replay(
    trace: &Trace,
    config: &Config,
    modality: Modality,
    base_dir: Option<&Path>,
) -> Result<(SurfaceController, Vec<PathBuf>), ReplayError> {
    let (width, height, bounds) = match &trace.surface {
        Some(s) => (s.width, s.height, s.bounds()),
        None => (
            config.surface.width,
            config.surface.height,
            SurfaceBounds::default(),
        ),
    };

    let mut controller = SurfaceController::new(
        width,
        height,
        config.surface.background.to_color(),
        config.drawing.default_color.to_color(),
        config.drawing.default_stroke_width,
        config.drawing.default_font_size,
        config.drawing.font_family.clone(),
        modality,
        bounds,
    )?;

    let mut exports = Vec::new();
    let mut bounds = bounds;

    for event in &trace.events {
        match event {
            TraceEvent::PointerDown { pointer } => controller.on_pointer_down(pointer),
            TraceEvent::PointerMove { pointer } => controller.on_pointer_move(pointer),
            TraceEvent::PointerUp => controller.on_pointer_up(),
            TraceEvent::SurfaceTap => controller.on_surface_tap(),
            TraceEvent::ToolModeToggle => controller.on_tool_mode_toggle(),
            TraceEvent::StrokeWidth { value } => controller.on_stroke_width_change(*value),
            TraceEvent::FontSize { value } => controller.on_font_size_change(*value),
            TraceEvent::Color { value } => match parse_color(value) {
                Some(color) => controller.on_color_change(color),
                None => log::warn!("Skipping unparseable color '{value}'"),
            },
            TraceEvent::PaletteSwatch { value } => match parse_color(value) {
                Some(color) => controller.on_palette_swatch_click(color),
                None => log::warn!("Skipping unparseable swatch '{value}'"),
            },
            TraceEvent::Eraser => controller.on_eraser_activate(),
            TraceEvent::Clear => controller.on_clear_surface(),
            TraceEvent::TextInput { value } => controller.on_text_input_change(value.clone()),
            TraceEvent::TextStamp { pointer } => controller.on_text_stamp(pointer)?,
            TraceEvent::BackgroundImage { path } => {
                let resolved = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                let bytes = fs::read(&resolved).map_err(|source| ReplayError::ImageRead {
                    path: resolved.clone(),
                    source,
                })?;
                controller.on_background_image_load(&bytes)?;
            }
            TraceEvent::Resize {
                width,
                height,
                left,
                top,
            } => {
                if let Some(left) = left {
                    bounds.left = *left;
                }
                if let Some(top) = top {
                    bounds.top = *top;
                }
                controller.resize(*width, *height, bounds)?;
            }
            TraceEvent::Export => {
                exports.push(controller.on_export_request(&config.export.directory)?);
            }
        }
    }

    Ok((controller, exports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};
    use tempfile::TempDir;

    fn mouse_stroke_trace() -> Trace {
        serde_json::from_str(
            r#"{
                "platform": "X11; Linux x86_64",
                "surface": { "width": 40, "height": 40 },
                "events": [
                    { "type": "stroke_width", "value": 6.0 },
                    { "type": "color", "value": "black" },
                    { "type": "pointer_down", "x": 5.0, "y": 20.0 },
                    { "type": "pointer_move", "x": 35.0, "y": 20.0 },
                    { "type": "pointer_up" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn trace_parses_mouse_and_touch_pointer_shapes() {
        let trace: Trace = serde_json::from_str(
            r#"{
                "platform": "Android 14",
                "events": [
                    { "type": "pointer_down", "touches": [{ "x": 1.0, "y": 2.0 }] },
                    { "type": "pointer_up" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(trace.modality(), Modality::Touch);
        assert!(matches!(
            trace.events[0],
            TraceEvent::PointerDown {
                pointer: PointerEvent::Touch { .. }
            }
        ));
    }

    #[test]
    fn trace_events_round_trip_through_json() {
        let trace = mouse_stroke_trace();
        let raw = serde_json::to_string(&trace).unwrap();
        let parsed: Trace = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.events, trace.events);
    }

    #[test]
    fn replaying_a_stroke_paints_the_surface() {
        let trace = mouse_stroke_trace();
        let config = Config::default();
        let (controller, exports) =
            replay(&trace, &config, trace.modality(), None).unwrap();

        assert!(exports.is_empty());
        let mid = controller.surface().pixel(20, 20).unwrap();
        assert_eq!(mid, BLACK);
        assert_eq!(controller.surface().pixel(20, 5).unwrap(), WHITE);
    }

    #[test]
    fn export_event_writes_fixed_filename() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.export.directory = temp.path().to_path_buf();

        let mut trace = mouse_stroke_trace();
        trace.events.push(TraceEvent::Clear);
        trace.events.push(TraceEvent::Export);

        let (_, exports) = replay(&trace, &config, trace.modality(), None).unwrap();
        assert_eq!(exports.len(), 1);
        assert!(exports[0].ends_with(crate::export::EXPORT_FILENAME));
        assert!(exports[0].exists());
    }

    #[test]
    fn clear_then_export_is_all_background() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.export.directory = temp.path().to_path_buf();

        let mut trace = mouse_stroke_trace();
        trace.events.push(TraceEvent::Clear);
        trace.events.push(TraceEvent::Export);

        let (controller, exports) = replay(&trace, &config, trace.modality(), None).unwrap();

        // Decode the exported PNG back onto a fresh surface and probe it.
        let png = fs::read(&exports[0]).unwrap();
        let mut check = crate::draw::Surface::new(40, 40, BLACK).unwrap();
        check.draw_image_bytes(&png).unwrap();
        for y in (0..40).step_by(7) {
            for x in (0..40).step_by(7) {
                assert_eq!(check.pixel(x, y).unwrap(), WHITE, "pixel {x},{y}");
            }
        }
        drop(controller);
    }

    #[test]
    fn missing_background_image_is_an_error() {
        let mut trace = mouse_stroke_trace();
        trace.events.push(TraceEvent::BackgroundImage {
            path: PathBuf::from("does-not-exist.png"),
        });
        let config = Config::default();
        let err = replay(&trace, &config, trace.modality(), None).err().unwrap();
        assert!(matches!(err, ReplayError::ImageRead { .. }));
    }
}
