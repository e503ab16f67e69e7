//! Drawing session: the single owner of all drawing state.
//!
//! A [`Session`] ties the input normalizer, stroke renderer, mode controller,
//! surface and image loader together and exposes the control surface that
//! external UI (buttons, file pickers) calls into.

use crate::config::Config;
use crate::draw::{self, Color, DrawConfig, StrokeState};
use crate::input::{ElementOrigin, InputNormalizer, Normalized, PointerEvent, StrokeCommand};
use crate::loader::{DecodedImage, ImageLoader, LoadError};
use crate::mode::{ControlSelection, ModeController};
use crate::surface::{Surface, SurfaceError};
use std::path::Path;


/// All per-page drawing state.
///
/// Cairo surfaces are not thread-safe, so a session stays on the thread that
/// created it. Image decoding is the only work that leaves that thread.
#[derive(Debug)]
pub struct Session {
    surface: Surface,
    modes: ModeController,
    stroke: StrokeState,
    normalizer: InputNormalizer,
    loader: ImageLoader,
}

impl Session {
    /// Creates a session with a blank `width` x `height` surface and the
    /// default brush.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Self::with_draw_config(width, height, DrawConfig::default())
    }

    /// Creates a session using the canvas size and brush defaults from
    /// `config`.
    pub fn from_config(config: &Config) -> Result<Self, SurfaceError> {
        let draw_config = DrawConfig::new(
            config.drawing.default_color.to_color(),
            config.drawing.default_brush_width,
        );
        Self::with_draw_config(config.canvas.width, config.canvas.height, draw_config)
    }

    fn with_draw_config(
        width: u32,
        height: u32,
        draw_config: DrawConfig,
    ) -> Result<Self, SurfaceError> {
        Ok(Self {
            surface: Surface::new(width, height)?,
            modes: ModeController::new(draw_config),
            stroke: StrokeState::new(),
            normalizer: InputNormalizer::default(),
            loader: ImageLoader::new(),
        })
    }

    /// Replaces the image loader (e.g. with one backed by a mock reader).
    pub fn with_loader(mut self, loader: ImageLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn draw_config(&self) -> &DrawConfig {
        self.modes.config()
    }

    pub fn selection(&self) -> ControlSelection {
        self.modes.selection()
    }

    pub fn stroke(&self) -> &StrokeState {
        &self.stroke
    }

    /// Loader handle for callers that want to run a load independently of
    /// the session and install the result later.
    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    /// Records the drawable element's page offset.
    pub fn set_origin(&mut self, origin: ElementOrigin) {
        self.normalizer.set_origin(origin);
    }

    // ------------------------------------------------------------------
    // Input path
    // ------------------------------------------------------------------

    /// Feeds one pointer or touch event through the normalizer and renders
    /// whatever it produces.
    ///
    /// The returned value tells the host whether to suppress default
    /// gesture handling.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Normalized {
        let normalized = self.normalizer.normalize(event, &mut self.stroke);
        match normalized.command {
            Some(StrokeCommand::Sample { x, y }) => self.paint_segment(x, y),
            Some(StrokeCommand::EndPath) => self.end_path(),
            None => {}
        }
        normalized
    }

    /// Paints a segment from the current anchor to `(x, y)` in element-local
    /// coordinates under the current [`DrawConfig`].
    pub fn paint_segment(&mut self, x: f64, y: f64) {
        draw::paint_segment(&self.surface, self.modes.config(), &mut self.stroke, x, y);
    }

    /// Terminates the current path.
    pub fn end_path(&mut self) {
        draw::end_path(&mut self.stroke);
    }

    // ------------------------------------------------------------------
    // Control surface
    // ------------------------------------------------------------------

    /// Selects a brush color; always returns to paint mode.
    pub fn change_color(&mut self, color: Color) {
        self.modes.set_color(color);
    }

    /// Selects a brush width.
    pub fn change_brush(&mut self, size: f64) {
        self.modes.set_brush_width(size);
    }

    /// Switches to the compositing eraser.
    pub fn set_eraser(&mut self) {
        self.modes.set_erase_mode();
    }

    /// Removes all strokes, keeping the background.
    pub fn clear_canvas(&mut self) {
        self.surface.clear();
    }

    /// Removes all strokes and the background.
    pub fn reset_canvas(&mut self) {
        self.surface.reset();
    }

    /// Imports `path` as the new background.
    ///
    /// Read or decode failures leave the canvas untouched; they are logged and
    /// reported as `false` rather than propagated.
    pub async fn handle_image(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let loaded = self.loader.load_from_file(path).await;
        let result = loaded.and_then(|decoded| self.install_background(&decoded));

        match result {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Ignoring background image {}: {}", path.display(), err);
                false
            }
        }
    }

    /// Installs an already-decoded image as the background, replacing both
    /// the previous background and every stroke.
    pub fn install_background(&mut self, image: &DecodedImage) -> Result<(), LoadError> {
        let bitmap = image.to_surface()?;
        self.surface.set_background(bitmap);
        Ok(())
    }
}
