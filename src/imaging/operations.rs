//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they take
//! the derivative menu, compute parameters, and call the backend.
//!
//! For one photo the output is one proportional derivative per menu entry
//! plus one square, all written under the album's publish directory:
//!
//! ```text
//! {albums_dir}/{album}/
//! ├── IMG_1-sm.jpg    # longer side ≤ 800
//! ├── IMG_1-md.jpg    # longer side ≤ 2000
//! ├── IMG_1-lg.jpg    # longer side ≤ 4000
//! ├── IMG_1-xl.jpg    # longer side ≤ 6000
//! └── IMG_1-sq.jpg    # centered square, 640x640
//! ```
//!
//! A file already sitting at a derivative's path is deleted before the new
//! one is written, with a warning.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{center_square, derivative_filename, fit_within};
use super::params::{Encoding, Quality, ResizeParams, SquareParams};
use crate::config::{ImportConfig, OutputFormat, SizeSpec, SquareSpec};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// The derivative menu every photo is rendered at.
#[derive(Debug, Clone)]
pub struct DerivativeConfig {
    pub sizes: Vec<SizeSpec>,
    pub square: SquareSpec,
    pub format: OutputFormat,
}

impl From<&ImportConfig> for DerivativeConfig {
    fn from(config: &ImportConfig) -> Self {
        Self {
            sizes: config.sizes.clone(),
            square: config.square.clone(),
            format: config.output.format,
        }
    }
}

impl Default for DerivativeConfig {
    fn default() -> Self {
        Self::from(&ImportConfig::default())
    }
}

/// One planned backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivativeOp {
    Resize { size: String, params: ResizeParams },
    Square { size: String, params: SquareParams },
}

impl DerivativeOp {
    pub fn size(&self) -> &str {
        match self {
            DerivativeOp::Resize { size, .. } | DerivativeOp::Square { size, .. } => size,
        }
    }

    pub fn output(&self) -> &Path {
        match self {
            DerivativeOp::Resize { params, .. } => &params.output,
            DerivativeOp::Square { params, .. } => &params.output,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            DerivativeOp::Resize { params, .. } => (params.width, params.height),
            DerivativeOp::Square { params, .. } => (params.size, params.size),
        }
    }
}

/// A derivative written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDerivative {
    pub size: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// An older file at the same path was deleted first.
    pub replaced: bool,
}

/// Plan every derivative of one photo without executing anything.
pub fn plan_derivatives(
    source: Dimensions,
    album_dir: &Path,
    photo_id: &str,
    config: &DerivativeConfig,
) -> Vec<DerivativeOp> {
    let ext = config.format.extension();
    let mut ops: Vec<DerivativeOp> = config
        .sizes
        .iter()
        .map(|spec| {
            let (width, height) = fit_within(source.as_tuple(), spec.max_dimension);
            DerivativeOp::Resize {
                size: spec.name.clone(),
                params: ResizeParams {
                    output: album_dir.join(derivative_filename(photo_id, &spec.name, ext)),
                    width,
                    height,
                    encoding: Encoding {
                        format: config.format,
                        quality: Quality::new(spec.quality),
                    },
                },
            }
        })
        .collect();

    ops.push(DerivativeOp::Square {
        size: config.square.name.clone(),
        params: SquareParams {
            output: album_dir.join(derivative_filename(photo_id, &config.square.name, ext)),
            crop: center_square(source.as_tuple()),
            size: config.square.size,
            encoding: Encoding {
                format: config.format,
                quality: Quality::new(config.square.quality),
            },
        },
    });
    ops
}

/// Delete a file in the way of a derivative. Returns whether one existed.
fn clear_output(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            warn!(path = %path.display(), "overwriting existing derivative");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Decode `source` once and write all of its derivatives into `album_dir`.
///
/// Any failure aborts the photo; derivatives already written stay on disk
/// and are overwritten by the next attempt.
pub fn create_derivatives(
    backend: &impl ImageBackend,
    source: &Path,
    album_dir: &Path,
    photo_id: &str,
    config: &DerivativeConfig,
) -> Result<Vec<GeneratedDerivative>> {
    let image = backend.decode(source)?;
    let ops = plan_derivatives(image.dimensions, album_dir, photo_id, config);

    let mut generated = Vec::with_capacity(ops.len());
    for op in &ops {
        let replaced = clear_output(op.output())?;
        match op {
            DerivativeOp::Resize { params, .. } => backend.resize(&image, params)?,
            DerivativeOp::Square { params, .. } => backend.square(&image, params)?,
        }
        let (width, height) = op.dimensions();
        generated.push(GeneratedDerivative {
            size: op.size().to_string(),
            path: op.output().to_path_buf(),
            width,
            height,
            replaced,
        });
    }

    drop(image);
    Ok(generated)
}
