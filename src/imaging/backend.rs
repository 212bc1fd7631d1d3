//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four operations the pipeline needs:
//! load, crop, resize, and save. The image value is an associated type so a
//! test backend can stand in a plain [`Dimensions`] for real pixels.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image` crate.

use super::params::{CropRegion, ResizeParams};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid crop region: {0}")]
    InvalidRegion(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// Everything above this trait is backend-agnostic: the pipeline only asks
/// for these four operations and never touches pixels directly.
pub trait ImageBackend {
    /// In-memory image handled by this backend.
    type Image;

    /// Load and decode an image from disk.
    fn load(&self, path: &Path) -> Result<Self::Image, BackendError>;

    /// Dimensions of a loaded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Copy out a region of the image.
    fn crop(&self, image: &Self::Image, region: CropRegion) -> Result<Self::Image, BackendError>;

    /// Resize to exactly the requested dimensions with Lanczos3.
    fn resize(&self, image: &Self::Image, params: ResizeParams) -> Self::Image;

    /// Encode and write, choosing the format from the path's extension.
    ///
    /// Returns the pixel size of what was written. For most formats that is
    /// the image's own size; an ICO reports its largest frame.
    fn save(&self, image: &Self::Image, path: &Path) -> Result<Dimensions, BackendError>;
}
