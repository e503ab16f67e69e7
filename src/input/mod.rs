//! Input handling.
//!
//! Translates host mouse and touch events into a single stream of stroke
//! commands in the drawable element's local coordinate space.

pub mod events;
pub mod normalizer;

pub use events::{PointerEvent, PointerPhase, PointerSource};
pub use normalizer::{ElementOrigin, InputNormalizer, Normalized, StrokeCommand};
