//! Replay scripts: a JSON list of control-surface calls and raw input events.
//!
//! ```json
//! [
//!   {"op": "offset", "left": 8, "top": 8},
//!   {"op": "color", "value": "red"},
//!   {"op": "brush", "size": 10},
//!   {"op": "pointer", "phase": "down", "x": 20, "y": 20},
//!   {"op": "pointer", "phase": "move", "x": 60, "y": 40},
//!   {"op": "pointer", "phase": "up"},
//!   {"op": "image", "path": "background.png"}
//! ]
//! ```

use crate::draw::{Color, ParseColorError};
use crate::input::{ElementOrigin, PointerEvent, PointerPhase, PointerSource};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One replayable action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Raw pointer/touch event in page coordinates
    Pointer {
        phase: PointerPhase,
        #[serde(default)]
        source: PointerSource,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        /// Active touch contacts; defaults to `[[x, y]]` for touch down/move
        #[serde(default)]
        touches: Vec<(f64, f64)>,
    },
    /// `changeColor`
    Color { value: String },
    /// `changeBrush`
    Brush { size: f64 },
    /// `setEraser`
    Eraser,
    /// `clearCanvas`
    Clear,
    /// `resetCanvas`
    Reset,
    /// `handleImage`; relative paths resolve against the script's directory
    Image { path: PathBuf },
    /// Page offset of the drawable element
    Offset { left: f64, top: f64 },
}

impl Step {
    fn pointer_event(&self) -> Option<PointerEvent> {
        let Step::Pointer {
            phase,
            source,
            x,
            y,
            touches,
        } = self
        else {
            return None;
        };

        Some(match source {
            PointerSource::Mouse => PointerEvent::mouse(*phase, *x, *y),
            PointerSource::Touch => {
                let contacts = if touches.is_empty()
                    && matches!(phase, PointerPhase::Down | PointerPhase::Move)
                {
                    vec![(*x, *y)]
                } else {
                    touches.clone()
                };
                PointerEvent::touch(*phase, contacts)
            }
        })
    }
}

/// Errors raised while parsing or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("step {index}: {source}")]
    Color {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub segments_dropped: usize,
    pub images_loaded: usize,
    pub images_failed: usize,
}

/// Parses a JSON step list and checks every color string up front, so a
/// bad script fails before any pixel is touched.
pub fn parse(json: &str) -> Result<Vec<Step>, ScriptError> {
    let steps: Vec<Step> = serde_json::from_str(json)?;
    for (index, step) in steps.iter().enumerate() {
        if let Step::Color { value } = step {
            value
                .parse::<Color>()
                .map_err(|source| ScriptError::Color { index, source })?;
        }
    }
    Ok(steps)
}

/// Applies `steps` to `session` in order. Image loads are awaited in place.
pub async fn replay(
    session: &mut Session,
    steps: &[Step],
    base_dir: &Path,
) -> Result<ReplaySummary, ScriptError> {
    let mut summary = ReplaySummary::default();

    for (index, step) in steps.iter().enumerate() {
        log::trace!("Step {}: {:?}", index, step);
        match step {
            Step::Pointer { .. } => {
                if let Some(event) = step.pointer_event() {
                    let normalized = session.handle_pointer(&event);
                    if event.phase == PointerPhase::Move && normalized.command.is_none() {
                        summary.segments_dropped += 1;
                    }
                }
            }
            Step::Color { value } => {
                let color = value
                    .parse::<Color>()
                    .map_err(|source| ScriptError::Color { index, source })?;
                session.change_color(color);
            }
            Step::Brush { size } => session.change_brush(*size),
            Step::Eraser => session.set_eraser(),
            Step::Clear => session.clear_canvas(),
            Step::Reset => session.reset_canvas(),
            Step::Image { path } => {
                let resolved = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                if session.handle_image(&resolved).await {
                    summary.images_loaded += 1;
                } else {
                    summary.images_failed += 1;
                }
            }
            Step::Offset { left, top } => session.set_origin(ElementOrigin::new(*left, *top)),
        }
        summary.steps += 1;
    }

    log::info!(
        "Replayed {} steps ({} images loaded, {} failed, {} samples dropped)",
        summary.steps,
        summary.images_loaded,
        summary.images_failed,
        summary.segments_dropped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let steps = parse(
            r##"[
                {"op": "offset", "left": 1, "top": 2},
                {"op": "color", "value": "#00ff00"},
                {"op": "brush", "size": 3.5},
                {"op": "eraser"},
                {"op": "clear"},
                {"op": "reset"},
                {"op": "image", "path": "bg.png"},
                {"op": "pointer", "phase": "move", "source": "touch", "touches": [[1, 2], [3, 4]]}
            ]"##,
        )
        .unwrap();

        assert_eq!(steps.len(), 8);
        assert_eq!(steps[3], Step::Eraser);
        assert_eq!(
            steps[7],
            Step::Pointer {
                phase: PointerPhase::Move,
                source: PointerSource::Touch,
                x: 0.0,
                y: 0.0,
                touches: vec![(1.0, 2.0), (3.0, 4.0)],
            }
        );
    }

    #[test]
    fn rejects_bad_color_with_step_index() {
        let err = parse(r#"[{"op": "clear"}, {"op": "color", "value": "nope"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Color { index: 1, .. }));
    }

    #[test]
    fn rejects_unknown_op() {
        assert!(matches!(
            parse(r#"[{"op": "undo"}]"#),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn touch_without_contacts_uses_position() {
        let step = Step::Pointer {
            phase: PointerPhase::Down,
            source: PointerSource::Touch,
            x: 5.0,
            y: 6.0,
            touches: Vec::new(),
        };
        let event = step.pointer_event().unwrap();
        assert_eq!(event.touches, vec![(5.0, 6.0)]);

        let end = Step::Pointer {
            phase: PointerPhase::Up,
            source: PointerSource::Touch,
            x: 5.0,
            y: 6.0,
            touches: Vec::new(),
        };
        assert!(end.pointer_event().unwrap().touches.is_empty());
    }

    #[tokio::test]
    async fn replay_draws_and_counts_dropped_samples() {
        let mut session = Session::new(50, 50).unwrap();
        let steps = parse(
            r#"[
                {"op": "pointer", "phase": "move", "x": 10, "y": 10},
                {"op": "color", "value": "red"},
                {"op": "pointer", "phase": "down", "x": 25, "y": 25},
                {"op": "pointer", "phase": "move", "x": 25, "y": 25},
                {"op": "pointer", "phase": "up"}
            ]"#,
        )
        .unwrap();

        let summary = replay(&mut session, &steps, Path::new(".")).await.unwrap();
        assert_eq!(summary.steps, 5);
        assert_eq!(summary.segments_dropped, 1);
        assert_eq!(session.surface().pixel(25, 25), Some([255, 0, 0, 255]));
        assert_eq!(session.surface().pixel(10, 10), Some([0, 0, 0, 0]));
    }

    #[tokio::test]
    async fn replay_counts_failed_images_without_erroring() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(10, 10).unwrap();
        let steps = parse(r#"[{"op": "image", "path": "missing.png"}]"#).unwrap();

        let summary = replay(&mut session, &steps, temp.path()).await.unwrap();
        assert_eq!(summary.images_failed, 1);
        assert_eq!(summary.images_loaded, 0);
    }
}
