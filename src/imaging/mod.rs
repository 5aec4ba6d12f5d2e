//! Image processing: the derivative generator.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, TIFF, WebP) |
//! | **EXIF carry-over** | decoder `exif_metadata` → encoder `set_exif_metadata` |
//! | **Resize** | Lanczos3, longer side bounded, never upscaled |
//! | **Square** | centered crop + Lanczos3 onto a fixed canvas |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, SourceImage};
pub use calculations::{SquareCrop, center_square, derivative_filename, fit_within};
pub use operations::{
    DerivativeConfig, DerivativeOp, GeneratedDerivative, create_derivatives, plan_derivatives,
};
pub use params::{Encoding, Quality, ResizeParams, SquareParams};
pub use rust_backend::RustBackend;
