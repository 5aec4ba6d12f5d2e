//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader::into_decoder` with guessed format |
//! | Read EXIF | `ImageDecoder::exif_metadata` (JPEG, PNG, WebP) |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Square crop | `DynamicImage::crop_imm` + `resize_exact` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the derivative's quality |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//! | Write EXIF | `ImageEncoder::set_exif_metadata` (APP1 for JPEG, `EXIF` chunk for WebP) |
//!
//! EXIF travels as the raw TIFF structure, the form every decoder returns and
//! every encoder accepts. TIFF sources expose no separate EXIF block through
//! the decoder, so their derivatives are written without one.

use super::backend::{BackendError, Dimensions, ImageBackend, SourceImage};
use super::params::{Encoding, ResizeParams, SquareParams};
use crate::config::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageEncoder, ImageReader};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Identifier some containers keep in front of the TIFF structure.
const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Largest TIFF block that fits one JPEG APP1 segment next to its header.
const MAX_JPEG_EXIF: usize = u16::MAX as usize - 2 - EXIF_HEADER.len();

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a decoder's EXIF block to the bare TIFF structure.
fn tiff_block(raw: Vec<u8>) -> Option<Vec<u8>> {
    let tiff = match raw.strip_prefix(EXIF_HEADER) {
        Some(rest) => rest.to_vec(),
        None => raw,
    };
    (!tiff.is_empty()).then_some(tiff)
}

/// Scale to exactly `width`x`height`, skipping the resample when nothing changes.
fn scale(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if img.width() == width && img.height() == height {
        img.clone()
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    }
}

/// Hand the source EXIF to an encoder, unless the container cannot hold it.
fn attach_exif(encoder: &mut impl ImageEncoder, exif: Option<&[u8]>, limit: usize, output: &Path) {
    let Some(tiff) = exif else {
        return;
    };
    if tiff.len() > limit {
        warn!(output = %output.display(), bytes = tiff.len(), "EXIF too large to carry, writing without it");
        return;
    }
    if let Err(e) = encoder.set_exif_metadata(tiff.to_vec()) {
        warn!(output = %output.display(), error = %e, "encoder rejected EXIF, writing without it");
    }
}

/// Encode to an in-memory buffer in the requested format, carrying `exif`.
fn encode(
    img: &DynamicImage,
    encoding: Encoding,
    exif: Option<&[u8]>,
    output: &Path,
) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    match encoding.format {
        OutputFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, encoding.quality.value());
            attach_exif(&mut encoder, exif, MAX_JPEG_EXIF, output);
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;
        }
        OutputFormat::Webp => {
            let mut encoder = WebPEncoder::new_lossless(&mut buf);
            attach_exif(&mut encoder, exif, u32::MAX as usize, output);
            DynamicImage::ImageRgba8(img.to_rgba8())
                .write_with_encoder(encoder)
                .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {e}")))?;
        }
    }
    Ok(buf)
}

/// Encode `img` with the source EXIF and write it to `output`.
fn save_derivative(
    img: &DynamicImage,
    source: &SourceImage,
    encoding: Encoding,
    output: &Path,
) -> Result<(), BackendError> {
    let bytes = encode(img, encoding, source.exif.as_deref(), output)?;
    std::fs::write(output, bytes)?;
    debug!(output = %output.display(), width = img.width(), height = img.height(), "wrote derivative");
    Ok(())
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<SourceImage, BackendError> {
        let decode_failed = |e: image::ImageError| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        };

        let bytes = std::fs::read(path)?;
        let mut decoder = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()?
            .into_decoder()
            .map_err(decode_failed)?;

        let exif = match decoder.exif_metadata() {
            Ok(raw) => raw.and_then(tiff_block),
            Err(e) => {
                warn!(source = %path.display(), error = %e, "unreadable EXIF, nothing carried forward");
                None
            }
        };
        match &exif {
            Some(tiff) => {
                let tags = crate::exif::parse_tiff_tags(tiff).map_or(0, |tags| tags.len());
                debug!(source = %path.display(), tags, "carrying EXIF forward");
            }
            None => debug!(source = %path.display(), "no EXIF to carry forward"),
        }

        let pixels = DynamicImage::from_decoder(decoder).map_err(decode_failed)?;
        Ok(SourceImage::new(pixels, exif))
    }

    fn resize(&self, source: &SourceImage, params: &ResizeParams) -> Result<(), BackendError> {
        let resized = scale(&source.pixels, params.width, params.height);
        save_derivative(&resized, source, params.encoding, &params.output)
    }

    fn square(&self, source: &SourceImage, params: &SquareParams) -> Result<(), BackendError> {
        let Dimensions { width, height } = source.dimensions;
        let crop = params.crop;
        if crop.side == 0 || crop.x + crop.side > width || crop.y + crop.side > height {
            return Err(BackendError::ProcessingFailed(format!(
                "Square crop {}x{}+{}+{} outside {}x{} source",
                crop.side, crop.side, crop.x, crop.y, width, height
            )));
        }
        let cropped = source.pixels.crop_imm(crop.x, crop.y, crop.side, crop.side);
        let squared = scale(&cropped, params.size, params.size);
        save_derivative(&squared, source, params.encoding, &params.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::calculations::center_square;
    use crate::imaging::params::Quality;
    use crate::test_helpers::{
        create_test_jpeg, create_test_jpeg_with_exif, create_test_png_with_exif, minimal_tiff,
    };

    fn jpeg(quality: u8) -> Encoding {
        Encoding {
            format: OutputFormat::Jpeg,
            quality: Quality::new(quality),
        }
    }

    fn webp() -> Encoding {
        Encoding {
            format: OutputFormat::Webp,
            quality: Quality::default(),
        }
    }

    #[test]
    fn decode_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let source = RustBackend::new().decode(&path).unwrap();
        assert_eq!(source.dimensions.as_tuple(), (200, 150));
        assert!(source.exif.is_none());
    }

    fn resize_to(backend: &RustBackend, source: &SourceImage, output: &Path, encoding: Encoding) {
        backend
            .resize(
                source,
                &ResizeParams {
                    output: output.to_path_buf(),
                    width: source.dimensions.width / 2,
                    height: source.dimensions.height / 2,
                    encoding,
                },
            )
            .unwrap();
    }

    #[test]
    fn decode_keeps_jpeg_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg_with_exif(&path, 64, 48);

        let source = RustBackend::new().decode(&path).unwrap();
        assert_eq!(source.exif, Some(minimal_tiff()));
    }

    #[test]
    fn decode_keeps_png_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.png");
        create_test_png_with_exif(&path, 64, 48);

        let source = RustBackend::new().decode(&path).unwrap();
        assert_eq!(source.dimensions.as_tuple(), (64, 48));
        assert_eq!(source.exif, Some(minimal_tiff()));
    }

    #[test]
    fn tiff_block_strips_identifier_and_drops_empty() {
        let mut prefixed = EXIF_HEADER.to_vec();
        prefixed.extend_from_slice(b"II*\0");
        assert_eq!(tiff_block(prefixed), Some(b"II*\0".to_vec()));
        assert_eq!(tiff_block(b"MM\0*".to_vec()), Some(b"MM\0*".to_vec()));
        assert_eq!(tiff_block(EXIF_HEADER.to_vec()), None);
        assert_eq!(tiff_block(Vec::new()), None);
    }

    #[test]
    fn decode_ignores_misleading_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("really-a-jpeg.png");
        create_test_jpeg(&path, 40, 30);

        let source = RustBackend::new().decode(&path).unwrap();
        assert_eq!(source.dimensions.as_tuple(), (40, 30));
    }

    #[test]
    fn decode_nonexistent_file_errors() {
        let result = RustBackend::new().decode(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn decode_garbage_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("notes.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = RustBackend::new().decode(&path);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_writes_jpeg_with_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.jpg");
        create_test_jpeg_with_exif(&path, 400, 300);

        let backend = RustBackend::new();
        let source = backend.decode(&path).unwrap();
        let output = tmp.path().join("source-sm.jpg");
        backend
            .resize(
                &source,
                &ResizeParams {
                    output: output.clone(),
                    width: 200,
                    height: 150,
                    encoding: jpeg(80),
                },
            )
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (200, 150));
        let written = backend.decode(&output).unwrap();
        assert_eq!(written.exif, Some(minimal_tiff()));
    }

    #[test]
    fn png_source_exif_reaches_jpeg_and_webp() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.png");
        create_test_png_with_exif(&path, 80, 60);

        let backend = RustBackend::new();
        let source = backend.decode(&path).unwrap();
        let as_jpeg = tmp.path().join("source-sm.jpg");
        let as_webp = tmp.path().join("source-sm.webp");
        resize_to(&backend, &source, &as_jpeg, jpeg(80));
        resize_to(&backend, &source, &as_webp, webp());

        assert_eq!(backend.decode(&as_jpeg).unwrap().exif, Some(minimal_tiff()));
        assert_eq!(backend.decode(&as_webp).unwrap().exif, Some(minimal_tiff()));
    }

    #[test]
    fn oversized_exif_is_left_out_of_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = SourceImage::new(
            DynamicImage::new_rgb8(16, 16),
            Some(vec![0u8; MAX_JPEG_EXIF + 1]),
        );
        let output = tmp.path().join("big-sm.jpg");

        let backend = RustBackend::new();
        resize_to(&backend, &source, &output, jpeg(80));

        let written = backend.decode(&output).unwrap();
        assert_eq!(written.dimensions.as_tuple(), (8, 8));
        assert!(written.exif.is_none());
    }

    #[test]
    fn resize_to_webp_keeps_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.jpg");
        create_test_jpeg_with_exif(&path, 120, 90);

        let backend = RustBackend::new();
        let source = backend.decode(&path).unwrap();
        let output = tmp.path().join("source-sm.webp");
        backend
            .resize(
                &source,
                &ResizeParams {
                    output: output.clone(),
                    width: 60,
                    height: 45,
                    encoding: webp(),
                },
            )
            .unwrap();

        assert!(std::fs::read(&output).unwrap().starts_with(b"RIFF"));
        let written = backend.decode(&output).unwrap();
        assert_eq!(written.dimensions.as_tuple(), (60, 45));
        assert_eq!(written.exif, Some(minimal_tiff()));
    }

    #[test]
    fn square_from_landscape_has_exact_canvas() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("wide.jpg");
        create_test_jpeg(&path, 800, 600);

        let backend = RustBackend::new();
        let source = backend.decode(&path).unwrap();
        let output = tmp.path().join("wide-sq.jpg");
        backend
            .square(
                &source,
                &SquareParams {
                    output: output.clone(),
                    crop: center_square((800, 600)),
                    size: 64,
                    encoding: jpeg(80),
                },
            )
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (64, 64));
    }

    #[test]
    fn square_upscales_small_sources_onto_canvas() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tiny.jpg");
        create_test_jpeg(&path, 30, 50);

        let backend = RustBackend::new();
        let source = backend.decode(&path).unwrap();
        let output = tmp.path().join("tiny-sq.jpg");
        backend
            .square(
                &source,
                &SquareParams {
                    output: output.clone(),
                    crop: center_square((30, 50)),
                    size: 64,
                    encoding: jpeg(80),
                },
            )
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (64, 64));
    }

    #[test]
    fn square_rejects_crop_outside_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("small.jpg");
        create_test_jpeg(&path, 40, 40);

        let backend = RustBackend::new();
        let source = backend.decode(&path).unwrap();
        let result = backend.square(
            &source,
            &SquareParams {
                output: tmp.path().join("small-sq.jpg"),
                crop: center_square((80, 80)),
                size: 16,
                encoding: jpeg(80),
            },
        );
        assert!(result.is_err());
        assert!(!tmp.path().join("small-sq.jpg").exists());
    }

    #[test]
    fn write_into_missing_directory_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.jpg");
        create_test_jpeg(&path, 20, 20);

        let backend = RustBackend::new();
        let source = backend.decode(&path).unwrap();
        let result = backend.resize(
            &source,
            &ResizeParams {
                output: tmp.path().join("missing/source-sm.jpg"),
                width: 10,
                height: 10,
                encoding: jpeg(80),
            },
        );
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
