//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{CropRegion, Margin};

/// Calculate the region left after trimming `margin` from every edge.
///
/// Returns `None` when the margins meet or cross, i.e. when
/// `2 × margin >= width` or `2 × margin >= height`.
///
/// # Examples
/// ```
/// # use iconcrop::imaging::{calculate_crop_region, Margin};
/// let region = calculate_crop_region((612, 612), Margin(50)).unwrap();
/// assert_eq!((region.x, region.y), (50, 50));
/// assert_eq!((region.width, region.height), (512, 512));
///
/// assert!(calculate_crop_region((100, 400), Margin(50)).is_none());
/// ```
pub fn calculate_crop_region(source: (u32, u32), margin: Margin) -> Option<CropRegion> {
    let (width, height) = source;
    let m = margin.value();
    let trimmed = m.checked_mul(2)?;

    let crop_w = width.checked_sub(trimmed).filter(|&w| w > 0)?;
    let crop_h = height.checked_sub(trimmed).filter(|&h| h > 0)?;

    Some(CropRegion {
        x: m,
        y: m,
        width: crop_w,
        height: crop_h,
    })
}

/// Frame sizes for a multi-resolution icon built from a square of `edge` pixels.
///
/// Standard favicon sizes below the largest frame, followed by the largest
/// frame itself (`edge`, capped at the 256px ICO limit).
pub fn calculate_icon_frames(edge: u32) -> Vec<u32> {
    const STANDARD: &[u32] = &[16, 24, 32, 48, 64, 128];
    const ICO_MAX: u32 = 256;

    let largest = edge.min(ICO_MAX);
    let mut frames: Vec<u32> = STANDARD
        .iter()
        .copied()
        .filter(|&size| size < largest)
        .collect();
    if largest > 0 {
        frames.push(largest);
    }
    frames
}
