//! Per-segment drawing parameters.

use super::color::{BLACK, Color};

/// How newly drawn pixels combine with the pixels already in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Draw over existing content (source-over).
    #[default]
    Paint,
    /// Remove existing content where the brush passes (destination-out).
    Erase,
}

impl CompositeMode {
    /// Cairo operator applied to the context for each segment.
    pub fn operator(self) -> cairo::Operator {
        match self {
            CompositeMode::Paint => cairo::Operator::Over,
            CompositeMode::Erase => cairo::Operator::DestOut,
        }
    }
}

/// Color, brush width and compositing mode read by every stroke segment.
///
/// A segment captures the values in effect when it is painted; later changes
/// never touch pixels that are already committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawConfig {
    pub color: Color,
    pub width: f64,
    pub mode: CompositeMode,
}

impl DrawConfig {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            mode: CompositeMode::Paint,
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::new(BLACK, 5.0)
    }
}
