//! Parameter types for image operations.
//!
//! These structs describe *what* to render, not *how*. They sit between the
//! high-level [`operations`](super::operations) module, which plans the
//! derivatives of one photo, and the [`backend`](super::backend), which does
//! the pixel work. A mock backend can record them without touching pixels.

use super::calculations::SquareCrop;
use crate::config::OutputFormat;
use std::path::PathBuf;

/// Quality setting for lossy encoding (1-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// How a derivative is encoded on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub format: OutputFormat,
    /// Ignored for lossless WebP.
    pub quality: Quality,
}

/// A proportional resize of the whole source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
}

/// A centered square crop scaled onto a fixed canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareParams {
    pub output: PathBuf,
    pub crop: SquareCrop,
    /// Side of the output canvas.
    pub size: u32,
    pub encoding: Encoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_80() {
        assert_eq!(Quality::default().value(), 80);
    }
}
