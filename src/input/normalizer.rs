//! Folds mouse and touch streams into one press/sample/release stream.

use super::events::{PointerEvent, PointerPhase, PointerSource};
use crate::draw::StrokeState;

/// Page offset of the drawable element's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementOrigin {
    pub left: f64,
    pub top: f64,
}

impl ElementOrigin {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Converts a page position into element-local coordinates.
    pub fn to_local(self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.left, client_y - self.top)
    }
}

/// Work the stroke renderer must do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeCommand {
    /// Paint a segment to this element-local point.
    Sample { x: f64, y: f64 },
    /// Terminate the current path.
    EndPath,
}

/// Outcome of normalizing one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Normalized {
    pub command: Option<StrokeCommand>,
    /// Whether the host should suppress its default gesture handling
    /// (scrolling, zooming) for this event.
    pub prevent_default: bool,
}

/// Converts heterogeneous pointer events into stroke commands.
#[derive(Debug, Clone, Default)]
pub struct InputNormalizer {
    origin: ElementOrigin,
}

impl InputNormalizer {
    pub fn new(origin: ElementOrigin) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> ElementOrigin {
        self.origin
    }

    /// Updates the element offset, e.g. after the page re-laid out.
    pub fn set_origin(&mut self, origin: ElementOrigin) {
        self.origin = origin;
    }

    /// Applies `event` to the gesture flag and reports what to render.
    pub fn normalize(&self, event: &PointerEvent, stroke: &mut StrokeState) -> Normalized {
        let is_touch = event.source == PointerSource::Touch;

        match event.phase {
            PointerPhase::Down => {
                stroke.begin();
                log::debug!("Gesture started ({:?})", event.source);
                Normalized {
                    command: None,
                    prevent_default: is_touch,
                }
            }
            PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel => {
                if stroke.is_drawing() {
                    log::debug!("Gesture ended ({:?} {:?})", event.source, event.phase);
                }
                stroke.stop();
                Normalized {
                    command: Some(StrokeCommand::EndPath),
                    prevent_default: false,
                }
            }
            PointerPhase::Move => {
                let command = if stroke.is_drawing() {
                    event.primary_position().map(|(client_x, client_y)| {
                        let (x, y) = self.origin.to_local(client_x, client_y);
                        StrokeCommand::Sample { x, y }
                    })
                } else {
                    None
                };
                Normalized {
                    command,
                    prevent_default: is_touch,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> InputNormalizer {
        InputNormalizer::new(ElementOrigin::new(10.0, 20.0))
    }

    #[test]
    fn move_without_press_is_dropped() {
        let mut stroke = StrokeState::new();
        let out = normalizer().normalize(
            &PointerEvent::mouse(PointerPhase::Move, 50.0, 50.0),
            &mut stroke,
        );
        assert_eq!(out.command, None);
        assert!(!stroke.is_drawing());
    }

    #[test]
    fn move_while_drawing_is_translated_to_local_space() {
        let normalizer = normalizer();
        let mut stroke = StrokeState::new();
        normalizer.normalize(&PointerEvent::mouse(PointerPhase::Down, 0.0, 0.0), &mut stroke);
        assert!(stroke.is_drawing());

        let out = normalizer.normalize(
            &PointerEvent::mouse(PointerPhase::Move, 50.0, 70.0),
            &mut stroke,
        );
        assert_eq!(out.command, Some(StrokeCommand::Sample { x: 40.0, y: 50.0 }));
        assert!(!out.prevent_default);
    }

    #[test]
    fn release_and_leave_end_the_path() {
        let normalizer = normalizer();
        for phase in [PointerPhase::Up, PointerPhase::Leave, PointerPhase::Cancel] {
            let mut stroke = StrokeState::new();
            stroke.begin();
            let out = normalizer.normalize(&PointerEvent::mouse(phase, 0.0, 0.0), &mut stroke);
            assert_eq!(out.command, Some(StrokeCommand::EndPath));
            assert!(!stroke.is_drawing(), "{phase:?} should stop drawing");
        }
    }

    #[test]
    fn touch_uses_primary_contact_and_suppresses_default() {
        let normalizer = normalizer();
        let mut stroke = StrokeState::new();

        let down = normalizer.normalize(
            &PointerEvent::touch(PointerPhase::Down, vec![(30.0, 40.0)]),
            &mut stroke,
        );
        assert!(down.prevent_default);

        let out = normalizer.normalize(
            &PointerEvent::touch(PointerPhase::Move, vec![(30.0, 40.0), (200.0, 200.0)]),
            &mut stroke,
        );
        assert_eq!(out.command, Some(StrokeCommand::Sample { x: 20.0, y: 20.0 }));
        assert!(out.prevent_default);
    }

    #[test]
    fn touch_move_without_contacts_is_dropped() {
        let normalizer = normalizer();
        let mut stroke = StrokeState::new();
        stroke.begin();
        let out = normalizer.normalize(
            &PointerEvent::touch(PointerPhase::Move, Vec::new()),
            &mut stroke,
        );
        assert_eq!(out.command, None);
    }
}
