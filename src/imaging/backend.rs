//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: decode, resize, and square. A photo is decoded once into a
//! [`SourceImage`] and every derivative is rendered from that copy; the
//! caller drops it when the photo is done.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::{ResizeParams, SquareParams};
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A decoded original, ready to render derivatives from.
pub struct SourceImage {
    pub dimensions: Dimensions,
    /// The original's EXIF as a bare TIFF structure, if it had one.
    pub exif: Option<Vec<u8>>,
    pub(crate) pixels: DynamicImage,
}

impl SourceImage {
    pub fn new(pixels: DynamicImage, exif: Option<Vec<u8>>) -> Self {
        Self {
            dimensions: Dimensions {
                width: pixels.width(),
                height: pixels.height(),
            },
            exif,
            pixels,
        }
    }
}

/// Trait for image processing backends.
///
/// Every backend implements all three operations so the rest of the codebase
/// is backend-agnostic.
pub trait ImageBackend {
    /// Read and decode a source file, keeping its embedded EXIF.
    fn decode(&self, path: &Path) -> Result<SourceImage, BackendError>;

    /// Render a proportional resize of `source` and write it.
    fn resize(&self, source: &SourceImage, params: &ResizeParams) -> Result<(), BackendError>;

    /// Render a centered square crop of `source` onto a fixed canvas and write it.
    fn square(&self, source: &SourceImage, params: &SquareParams) -> Result<(), BackendError>;
}
