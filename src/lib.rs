//! Library exports for the sketchboard drawing surface.
//!
//! Exposes the interaction controller and its supporting modules so that
//! embedders (and the trace-replay binary) can drive a drawing session
//! programmatically.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod trace;
pub mod util;

pub use config::Config;
