//! Incremental freehand stroke rendering.
//!
//! Each pointer sample paints one segment from the previous sample straight
//! into the pixel buffer; nothing about the stroke is retained afterwards
//! except the anchor for the next segment.

use super::config::DrawConfig;
use crate::surface::Surface;

/// Transient per-gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeState {
    drawing: bool,
    anchor: Option<(f64, f64)>,
}

impl StrokeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between press and release/leave/cancel.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Last committed point of the current path, if any.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        self.anchor
    }

    /// Marks a gesture as started.
    pub fn begin(&mut self) {
        self.drawing = true;
    }

    /// Marks the gesture as finished. The path anchor is left for
    /// [`end_path`] to drop.
    pub fn stop(&mut self) {
        self.drawing = false;
    }
}

/// Paints the segment from the current anchor to `(x, y)` and re-anchors
/// the path there.
///
/// The first sample of a path has no anchor; it is used as both ends of a
/// zero-length segment, which the round cap turns into a dot.
pub fn paint_segment(
    surface: &Surface,
    config: &DrawConfig,
    stroke: &mut StrokeState,
    x: f64,
    y: f64,
) {
    let from = stroke.anchor.unwrap_or((x, y));
    log::trace!(
        "Segment ({:.1}, {:.1}) -> ({:.1}, {:.1}) mode={:?} width={:.1}",
        from.0,
        from.1,
        x,
        y,
        config.mode,
        config.width
    );

    if let Err(err) = surface.draw(|ctx| render_segment(ctx, config, from, (x, y))) {
        log::warn!("Failed to paint stroke segment: {}", err);
    }
    stroke.anchor = Some((x, y));
}

/// Starts a fresh path so the next segment does not join the previous one.
pub fn end_path(stroke: &mut StrokeState) {
    stroke.anchor = None;
}

/// Strokes a single round-capped line under `config`.
pub fn render_segment(
    ctx: &cairo::Context,
    config: &DrawConfig,
    from: (f64, f64),
    to: (f64, f64),
) -> Result<(), cairo::Error> {
    let color = config.color;
    ctx.set_operator(config.mode.operator());
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(config.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    ctx.stroke()
}
