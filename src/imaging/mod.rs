//! Image processing: pure Rust on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (PNG, JPEG, WebP, ICO) |
//! | **Crop** | `crop_imm` on a fixed-margin region |
//! | **Resize** | `resize_exact` with Lanczos3 |
//! | **Encode** | PNG / JPEG / WebP via `image`, ICO via [`icon`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop and icon-frame math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Icon**: multi-resolution ICO container encoding

pub mod backend;
mod calculations;
pub mod icon;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_crop_region, calculate_icon_frames};
pub use params::{CropRegion, Margin, ResizeParams, Variant};
pub use rust_backend::RustBackend;
