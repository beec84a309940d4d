//! Input handling and the interaction state machine.
//!
//! This module translates raw pointer events and control changes into
//! drawing-surface commands. It owns the session state (tool mode, stroke
//! parameters, pointer tracking) and the one normalization path that folds
//! mouse- and touch-shaped events into surface coordinates.

pub mod controller;
pub mod events;
pub mod session;


// Re-export commonly used types at module level
pub use controller::SurfaceController;
pub use events::{ClientPoint, Modality, PointerEvent, SurfaceBounds, extract_point};
pub use session::{DrawingSession, ToolMode};
