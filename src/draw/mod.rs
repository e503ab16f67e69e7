//! Rendering primitives for the raster drawing surface (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with a named palette
//! - [`DrawConfig`] / [`CompositeMode`]: parameters read by every segment
//! - [`StrokeState`] and the segment renderer in [`stroke`]

pub mod color;
pub mod config;
pub mod stroke;

pub use color::{Color, ParseColorError};
pub use config::{CompositeMode, DrawConfig};
pub use stroke::{StrokeState, end_path, paint_segment};
