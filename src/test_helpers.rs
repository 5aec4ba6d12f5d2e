//! Shared test utilities for the album-import test suite.
//!
//! Provides synthetic images (with and without EXIF), staging-directory
//! setup, and catalog builders.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let staged = stage_files(tmp.path(), "trip", &["a.jpg", "b.jpg"]);
//! let catalog = catalog_with("trip", &["a"]);
//! ```

use crate::config::ImportConfig;
use crate::types::{Album, Catalog, Photo, url_template};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a gradient JPEG of the given size into memory.
pub fn encode_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new(&mut buf)
        .write_image(gradient(width, height).as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Write a small valid JPEG without metadata.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_test_jpeg(width, height)).unwrap();
}

/// Write a small valid JPEG carrying [`minimal_tiff`] in its APP1 segment.
pub fn create_test_jpeg_with_exif(path: &Path, width: u32, height: u32) {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new(&mut buf);
    encoder.set_exif_metadata(minimal_tiff()).unwrap();
    encoder
        .write_image(gradient(width, height).as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

/// Write a small valid PNG carrying [`minimal_tiff`] in an `eXIf` chunk.
pub fn create_test_png_with_exif(path: &Path, width: u32, height: u32) {
    let mut buf = Vec::new();
    let mut encoder = PngEncoder::new(&mut buf);
    encoder.set_exif_metadata(minimal_tiff()).unwrap();
    encoder
        .write_image(gradient(width, height).as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

/// Little-endian TIFF with IFD0 = { Make: "X", GPSInfo → { GPSLatitudeRef: "N" } }.
pub fn minimal_tiff() -> Vec<u8> {
    fn entry(t: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
        t.extend_from_slice(&tag.to_le_bytes());
        t.extend_from_slice(&kind.to_le_bytes());
        t.extend_from_slice(&count.to_le_bytes());
        t.extend_from_slice(&value);
    }
    const ASCII: u16 = 2;
    const LONG: u16 = 4;

    let mut t = Vec::new();
    t.extend_from_slice(b"II");
    t.extend_from_slice(&42u16.to_le_bytes());
    t.extend_from_slice(&8u32.to_le_bytes());
    // IFD0 at 8: two entries, then the next-IFD offset; GPS IFD follows at 38
    t.extend_from_slice(&2u16.to_le_bytes());
    entry(&mut t, 0x010F, ASCII, 2, [b'X', 0, 0, 0]);
    entry(&mut t, 0x8825, LONG, 1, 38u32.to_le_bytes());
    t.extend_from_slice(&0u32.to_le_bytes());
    t.extend_from_slice(&1u16.to_le_bytes());
    entry(&mut t, 0x0001, ASCII, 2, [b'N', 0, 0, 0]);
    t.extend_from_slice(&0u32.to_le_bytes());
    t
}

// =========================================================================
// Staging setup
// =========================================================================

/// The stock staging root under a project root.
pub fn staging_root(root: &Path) -> PathBuf {
    ImportConfig::default().import_dir(root)
}

/// Create `{staging_root}/{album}` holding the named files and return it.
///
/// File contents are placeholders; use with the mock backend.
pub fn stage_files(root: &Path, album: &str, files: &[&str]) -> PathBuf {
    let dir = staging_root(root).join(album);
    std::fs::create_dir_all(&dir).unwrap();
    for name in files {
        std::fs::write(dir.join(name), b"staged").unwrap();
    }
    dir
}

// =========================================================================
// Catalog builders
// =========================================================================

/// A catalog with one album holding the given photo ids.
pub fn catalog_with(album_id: &str, photos: &[&str]) -> Catalog {
    let mut album = Album::new(album_id, url_template("/assets/albums", album_id, "jpg"));
    album.photos = photos.iter().map(|p| Photo::new(p)).collect();
    Catalog {
        albums: vec![album],
    }
}
