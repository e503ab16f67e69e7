//! Pixel buffer ownership and the compositing resets that act on it.
//!
//! [`Surface`] holds the drawable raster plus the optional background bitmap.
//! Every stroke segment mutates the raster in place; [`Surface::clear`],
//! [`Surface::reset`] and [`Surface::set_background`] all leave it holding
//! exactly the background (if any) and nothing else.

use cairo::{Context, Format, ImageSurface};
use std::io::Write;
use thiserror::Error;

/// Largest accepted edge length for the drawable area, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Errors raised while creating, drawing to, or reading back a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("pixel data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),
}

/// The drawable raster and its background slot.
pub struct Surface {
    buffer: ImageSurface,
    background: Option<ImageSurface>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.buffer.width())
            .field("height", &self.buffer.height())
            .field("has_background", &self.background.is_some())
            .finish()
    }
}

impl Surface {
    /// Creates a fully transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let buffer = create_image_surface(width, height)?;
        log::debug!("Created {}x{} drawing surface", width, height);
        Ok(Self {
            buffer,
            background: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.buffer.height() as u32
    }

    /// Whether a background image is currently installed.
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Runs `f` against a fresh Cairo context targeting the pixel buffer.
    ///
    /// The context is dropped before returning so the buffer can be read back
    /// immediately afterwards.
    pub fn draw<F>(&self, f: F) -> Result<(), SurfaceError>
    where
        F: FnOnce(&Context) -> Result<(), cairo::Error>,
    {
        let ctx = Context::new(&self.buffer)?;
        f(&ctx)?;
        drop(ctx);
        self.buffer.flush();
        Ok(())
    }

    /// Erases every stroke, then redraws the background (if any) scaled to
    /// fill the buffer.
    pub fn clear(&mut self) {
        let background = self.background.as_ref();
        let width = self.width() as f64;
        let height = self.height() as f64;
        let result = self.draw(|ctx| {
            erase_all(ctx)?;
            if let Some(image) = background {
                paint_background(ctx, image, width, height)?;
            }
            Ok(())
        });

        match result {
            Ok(()) => log::info!(
                "Cleared canvas ({})",
                if background.is_some() {
                    "background kept"
                } else {
                    "no background"
                }
            ),
            Err(err) => log::warn!("Failed to clear canvas: {}", err),
        }
    }

    /// Erases the buffer and forgets the background.
    pub fn reset(&mut self) {
        self.background = None;
        if let Err(err) = self.draw(erase_all) {
            log::warn!("Failed to reset canvas: {}", err);
            return;
        }
        log::info!("Reset canvas to a blank slate");
    }

    /// Installs `image` as the background and repaints the buffer with it.
    ///
    /// Replaces any previous background and discards all strokes.
    pub fn set_background(&mut self, image: ImageSurface) {
        log::info!(
            "Installing {}x{} background onto {}x{} canvas",
            image.width(),
            image.height(),
            self.width(),
            self.height()
        );
        self.background = Some(image);
        self.clear();
    }

    /// Returns the un-premultiplied RGBA value at `(x, y)`, or `None` when
    /// the coordinate lies outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let stride = self.buffer.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut argb = None;
        let read = self.buffer.with_data(|data| {
            if let Some(bytes) = data.get(offset..offset + 4) {
                argb = Some(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
            }
        });
        if let Err(err) = read {
            log::warn!("Failed to read pixel ({}, {}): {}", x, y, err);
            return None;
        }

        argb.map(unpremultiply)
    }

    /// Copies the raw ARGB32 buffer (premultiplied, native endian, row stride
    /// included).
    pub fn snapshot(&self) -> Result<Vec<u8>, SurfaceError> {
        let mut copy = Vec::new();
        self.buffer.with_data(|data| copy.extend_from_slice(data))?;
        Ok(copy)
    }

    /// Encodes the current buffer as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        self.buffer.write_to_png(writer)?;
        Ok(())
    }
}

/// Creates a transparent ARGB32 image surface after validating dimensions.
pub(crate) fn create_image_surface(width: u32, height: u32) -> Result<ImageSurface, SurfaceError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    Ok(ImageSurface::create(
        Format::ARgb32,
        width as i32,
        height as i32,
    )?)
}

fn erase_all(ctx: &Context) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Clear);
    ctx.paint()?;
    ctx.restore()
}

fn paint_background(
    ctx: &Context,
    image: &ImageSurface,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let image_width = image.width() as f64;
    let image_height = image.height() as f64;
    if image_width <= 0.0 || image_height <= 0.0 {
        return Ok(());
    }

    ctx.save()?;
    ctx.scale(width / image_width, height / image_height);
    ctx.set_source_surface(image, 0.0, 0.0)?;
    // Pad so scaled edges sample the image rather than transparent black
    ctx.source().set_extend(cairo::Extend::Pad);
    ctx.set_operator(cairo::Operator::Source);
    ctx.paint()?;
    ctx.restore()
}

fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = (argb >> 24) & 0xff;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let channel = |shift: u32| {
        let premultiplied = (argb >> shift) & 0xff;
        ((premultiplied * 255 + a / 2) / a).min(255) as u8
    };
    [channel(16), channel(8), channel(0), a as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, rgba: (f64, f64, f64)) -> ImageSurface {
        let image = create_image_surface(width, height).unwrap();
        let ctx = Context::new(&image).unwrap();
        ctx.set_source_rgb(rgba.0, rgba.1, rgba.2);
        ctx.paint().unwrap();
        drop(ctx);
        image
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
        assert!(Surface::new(10, MAX_DIMENSION + 1).is_err());
    }

    #[test]
    fn new_surface_is_transparent() {
        let surface = Surface::new(8, 8).unwrap();
        assert_eq!(surface.pixel(3, 3), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(8, 0), None);
        assert!(!surface.has_background());
    }

    #[test]
    fn set_background_fills_buffer_scaled() {
        let mut surface = Surface::new(20, 10).unwrap();
        surface.set_background(solid_image(4, 4, (0.0, 0.0, 1.0)));

        assert!(surface.has_background());
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel(19, 9), Some([0, 0, 255, 255]));
    }

    #[test]
    fn clear_keeps_background_and_reset_drops_it() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.set_background(solid_image(10, 10, (1.0, 0.0, 0.0)));

        surface
            .draw(|ctx| {
                ctx.set_source_rgb(0.0, 1.0, 0.0);
                ctx.rectangle(0.0, 0.0, 5.0, 5.0);
                ctx.fill()
            })
            .unwrap();
        assert_eq!(surface.pixel(2, 2), Some([0, 255, 0, 255]));

        surface.clear();
        assert_eq!(surface.pixel(2, 2), Some([255, 0, 0, 255]));

        surface.reset();
        assert!(!surface.has_background());
        assert_eq!(surface.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn write_png_produces_png_signature() {
        let surface = Surface::new(4, 4).unwrap();
        let mut bytes = Vec::new();
        surface.write_png(&mut bytes).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        // 50% opaque red: premultiplied red channel is 0x80
        assert_eq!(unpremultiply(0x8080_0000), [255, 0, 0, 128]);
        assert_eq!(unpremultiply(0x0012_3456), [0, 0, 0, 0]);
    }
}
