//! Pure calculation functions for derivative geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale `source` so its longer side does not exceed `max_dimension`.
///
/// Aspect ratio is preserved and sources are never upscaled: a source that
/// already fits is returned unchanged. Neither side drops below 1px.
///
/// # Examples
/// ```
/// # use album_import::imaging::fit_within;
/// // 4000x3000 landscape into an 800px box → 800x600
/// assert_eq!(fit_within((4000, 3000), 800), (800, 600));
///
/// // Already small enough → untouched
/// assert_eq!(fit_within((640, 480), 800), (640, 480));
/// ```
pub fn fit_within(source: (u32, u32), max_dimension: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let longer = src_w.max(src_h);

    if longer <= max_dimension {
        return source;
    }

    let ratio = max_dimension as f64 / longer as f64;
    if src_w >= src_h {
        // Landscape or square: width is the bound
        let h = ((src_h as f64 * ratio).round() as u32).max(1);
        (max_dimension, h)
    } else {
        let w = ((src_w as f64 * ratio).round() as u32).max(1);
        (w, max_dimension)
    }
}

/// A square region of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareCrop {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// The centered square of side `min(width, height)`.
///
/// Landscape sources are cropped horizontally centered, portrait ones
/// vertically centered. Odd leftovers favor the top/left edge.
pub fn center_square(source: (u32, u32)) -> SquareCrop {
    let (w, h) = source;
    let side = w.min(h);
    if w > h {
        SquareCrop {
            x: (w - side) / 2,
            y: 0,
            side,
        }
    } else {
        SquareCrop {
            x: 0,
            y: (h - side) / 2,
            side,
        }
    }
}

/// File name of one derivative: `{photo}-{size}.{ext}`.
pub fn derivative_filename(photo_id: &str, size: &str, extension: &str) -> String {
    format!("{photo_id}-{size}.{extension}")
}
