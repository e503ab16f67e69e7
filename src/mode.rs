//! Brush/eraser mode switching.

use crate::draw::{Color, CompositeMode, DrawConfig};

/// Selection highlight state for the external brush and eraser controls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSelection {
    /// Whether the eraser control is shown as selected
    pub eraser: bool,
    /// Width of the brush control shown as selected, if any
    pub brush: Option<f64>,
}

/// Owns the [`DrawConfig`] that the next stroke segment will read.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    config: DrawConfig,
    selection: ControlSelection,
}

impl ModeController {
    pub fn new(config: DrawConfig) -> Self {
        Self {
            config,
            selection: ControlSelection {
                eraser: config.mode == CompositeMode::Erase,
                brush: None,
            },
        }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn selection(&self) -> ControlSelection {
        self.selection
    }

    /// Sets the brush color and always leaves eraser mode.
    pub fn set_color(&mut self, color: Color) {
        self.config.color = color;
        self.config.mode = CompositeMode::Paint;
        self.selection.eraser = false;
        log::debug!("Brush color set to {}", color);
    }

    /// Sets the brush width. Color and compositing mode are untouched.
    ///
    /// Values are taken as supplied; range checks belong to the caller.
    pub fn set_brush_width(&mut self, width: f64) {
        self.config.width = width;
        self.selection.brush = Some(width);
        log::debug!("Brush width set to {:.1}", width);
    }

    /// Switches subsequent segments to destination-out compositing.
    pub fn set_erase_mode(&mut self) {
        self.config.mode = CompositeMode::Erase;
        self.selection.eraser = true;
        self.selection.brush = None;
        log::debug!("Eraser selected");
    }
}
