//! Freehand raster drawing surface.
//!
//! Pointer and touch input is normalized into stroke samples, painted
//! segment-by-segment into a Cairo pixel buffer under the current brush or
//! eraser settings, and composited over an optional imported background.
//! [`Session`] owns all of it and exposes the control surface used by
//! external UI.

pub mod config;
pub mod draw;
pub mod input;
pub mod loader;
pub mod mode;
pub mod script;
pub mod session;
pub mod surface;

pub use config::Config;
pub use session::Session;
