//! Multi-resolution ICO encoding.
//!
//! ICO directory entries store width and height in a single byte (0 meaning
//! 256), so no frame can exceed 256×256. A favicon is written as a set of
//! PNG-compressed frames at the standard sizes from
//! [`calculate_icon_frames`](super::calculations::calculate_icon_frames);
//! browsers pick whichever frame fits.

use super::backend::{BackendError, Dimensions};
use super::calculations::calculate_icon_frames;
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType};
use std::io::Write;

/// Encode `img` as an ICO container into `writer`.
///
/// Frames are resized from `img` (which is expected to be square) with
/// Lanczos3. A frame the size of `img` itself is encoded without resampling.
/// Returns the size of the largest frame, which is what decoders show.
pub fn encode_ico<W: Write>(img: &DynamicImage, writer: W) -> Result<Dimensions, BackendError> {
    let edge = img.width().min(img.height());
    let sizes = calculate_icon_frames(edge);
    let Some(&largest) = sizes.last() else {
        return Err(BackendError::Encode("cannot build an icon from an empty image".into()));
    };

    let mut frames = Vec::with_capacity(sizes.len());
    for size in sizes {
        let rgba = if size == img.width() && size == img.height() {
            img.to_rgba8()
        } else {
            img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8()
        };
        let frame = IcoFrame::as_png(rgba.as_raw(), size, size, ExtendedColorType::Rgba8)
            .map_err(|e| BackendError::Encode(format!("ICO frame {size}x{size}: {e}")))?;
        frames.push(frame);
    }

    IcoEncoder::new(writer)
        .encode_images(&frames)
        .map_err(|e| BackendError::Encode(format!("ICO encode failed: {e}")))?;
    Ok(Dimensions::new(largest, largest))
}
