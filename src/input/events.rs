//! Raw pointer and touch events as delivered by the host.

use serde::{Deserialize, Serialize};

/// Device class that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    /// Mouse or other hovering pointer
    #[default]
    Mouse,
    /// Touchscreen contact
    Touch,
}

/// Lifecycle phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed / touch started
    Down,
    /// Button released / touch ended
    Up,
    /// Pointer or primary contact moved
    Move,
    /// Pointer left the drawable element
    Leave,
    /// Touch sequence cancelled by the platform
    Cancel,
}

/// A pointer or touch event in page (client) coordinates.
///
/// For touch events `touches` lists every active contact; only the first one
/// is ever used for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub source: PointerSource,
    pub phase: PointerPhase,
    pub client_x: f64,
    pub client_y: f64,
    pub touches: Vec<(f64, f64)>,
}

impl PointerEvent {
    /// Creates a mouse event at the given page position.
    pub fn mouse(phase: PointerPhase, client_x: f64, client_y: f64) -> Self {
        Self {
            source: PointerSource::Mouse,
            phase,
            client_x,
            client_y,
            touches: Vec::new(),
        }
    }

    /// Creates a touch event from the list of active contacts.
    ///
    /// The event position is the primary contact, or the origin when the
    /// list is empty (as on touch-end).
    pub fn touch(phase: PointerPhase, touches: Vec<(f64, f64)>) -> Self {
        let (client_x, client_y) = touches.first().copied().unwrap_or((0.0, 0.0));
        Self {
            source: PointerSource::Touch,
            phase,
            client_x,
            client_y,
            touches,
        }
    }

    /// Page position used for drawing: the primary contact for touch,
    /// the pointer position otherwise.
    pub fn primary_position(&self) -> Option<(f64, f64)> {
        match self.source {
            PointerSource::Mouse => Some((self.client_x, self.client_y)),
            PointerSource::Touch => self.touches.first().copied(),
        }
    }
}
