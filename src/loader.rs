//! Background image import.
//!
//! Loading happens in two chained asynchronous stages: the file bytes are
//! read first, and only then decoded on tokio's blocking pool. The result is
//! a [`DecodedImage`], which is `Send` so the load can run while strokes keep
//! arriving; the Cairo surface is only built when the image is installed.

use crate::surface::{self, MAX_DIMENSION, SurfaceError};
use async_trait::async_trait;
use cairo::ImageSurface;
use image::GenericImageView;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task;

/// Errors that can occur while importing a background image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read image file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image file {0} is empty")]
    Empty(PathBuf),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image dimensions {width}x{height} exceed the {MAX_DIMENSION}px limit")]
    TooLarge { width: u32, height: u32 },

    #[error("decode task failed: {0}")]
    Task(String),

    #[error("failed to build drawable bitmap: {0}")]
    Surface(#[from] SurfaceError),
}

/// Abstraction over how image bytes are obtained. Mocked in tests.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, LoadError>;
}

struct TokioFileReader;

#[async_trait]
impl FileReader for TokioFileReader {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, LoadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(LoadError::Empty(path.to_path_buf()));
        }
        Ok(bytes)
    }
}

/// A decoded bitmap in straight-alpha RGBA8 order.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl DecodedImage {
    /// Wraps raw RGBA8 pixels. Returns `None` if the buffer length does not
    /// match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Builds a Cairo ARGB32 surface (premultiplied) from the pixels.
    pub fn to_surface(&self) -> Result<ImageSurface, SurfaceError> {
        let mut image = surface::create_image_surface(self.width, self.height)?;
        let stride = image.stride() as usize;
        {
            let mut data = image.data()?;
            for (y, row) in self.pixels.chunks_exact(self.width as usize * 4).enumerate() {
                let dest_row = &mut data[y * stride..y * stride + self.width as usize * 4];
                for (src, dest) in row.chunks_exact(4).zip(dest_row.chunks_exact_mut(4)) {
                    dest.copy_from_slice(&premultiplied_argb(src).to_ne_bytes());
                }
            }
        }
        Ok(image)
    }
}

fn premultiplied_argb(rgba: &[u8]) -> u32 {
    let a = rgba[3] as u32;
    let scale = |c: u8| (c as u32 * a + 127) / 255;
    (a << 24) | (scale(rgba[0]) << 16) | (scale(rgba[1]) << 8) | scale(rgba[2])
}

/// Reads and decodes user-supplied image files.
#[derive(Clone)]
pub struct ImageLoader {
    reader: Arc<dyn FileReader>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader").finish_non_exhaustive()
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self {
            reader: Arc::new(TokioFileReader),
        }
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom byte source instead of the filesystem.
    pub fn with_reader(reader: Arc<dyn FileReader>) -> Self {
        Self { reader }
    }

    /// Reads `path`, then decodes it. Decoding starts only after the read
    /// has completed.
    pub async fn load_from_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<DecodedImage, LoadError> {
        let path = path.as_ref();
        log::debug!("Reading image file {}", path.display());

        let bytes = self.reader.read(path).await?;
        log::debug!("Read {} bytes from {}", bytes.len(), path.display());

        let decoded = decode(bytes).await?;
        log::info!(
            "Decoded {}x{} image from {}",
            decoded.width,
            decoded.height,
            path.display()
        );
        Ok(decoded)
    }
}

/// Decodes encoded image bytes on the blocking pool.
pub async fn decode(bytes: Vec<u8>) -> Result<DecodedImage, LoadError> {
    task::spawn_blocking(move || decode_bytes(&bytes))
        .await
        .map_err(|e| LoadError::Task(e.to_string()))?
}

fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, LoadError> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = decoded.dimensions();
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(LoadError::TooLarge { width, height });
    }

    let rgba = decoded.into_rgba8();
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
