//! Rendering primitives for the drawing surface (tiny-skia based).
//!
//! This module defines the types the interaction controller draws with:
//! - [`Color`]: RGBA color representation with predefined palette constants
//! - [`Surface`]: the raster surface (segment stroking, flat fill, image
//!   compositing, PNG encoding)
//! - [`TextStamper`]: font lookup and glyph rasterization for text stamps

pub mod color;
pub mod surface;
pub mod text;

// Re-export commonly used types at module level
pub use color::Color;
pub use surface::{Surface, SurfaceError};
pub use text::{TextError, TextStamper};

// Re-export color constants for public API
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
