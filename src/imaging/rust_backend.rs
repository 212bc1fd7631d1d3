//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, WebP, ICO) | `image::ImageReader` with content sniffing |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → PNG / JPEG / WebP | `image::DynamicImage::write_to` |
//! | Encode → ICO | [`encode_ico`](super::icon::encode_ico) (multi-resolution) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::icon::encode_ico;
use super::params::{CropRegion, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output extensions [`RustBackend::save`] knows how to encode.
const OUTPUT_FORMATS: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("ico", ImageFormat::Ico),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("webp", ImageFormat::WebP),
];

/// Returns the lowercase extensions accepted for output paths.
fn supported_output_extensions() -> Vec<&'static str> {
    OUTPUT_FORMATS.iter().map(|(ext, _)| *ext).collect()
}

/// Resolve an output path's format from its extension (case-insensitive).
pub fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    OUTPUT_FORMATS
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, fmt)| *fmt)
        .ok_or_else(|| {
            let expected = supported_output_extensions().join(", ");
            if ext.is_empty() {
                BackendError::UnsupportedFormat(format!(
                    "{} has no extension (expected one of {expected})",
                    path.display()
                ))
            } else {
                BackendError::UnsupportedFormat(format!("{ext} (expected one of {expected})"))
            }
        })
}

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

/// Encode `img` in `format` into `writer`, returning the written size.
fn encode<W: Write + std::io::Seek>(
    img: &DynamicImage,
    format: ImageFormat,
    writer: &mut W,
) -> Result<Dimensions, BackendError> {
    let written = Dimensions::new(img.width(), img.height());
    match format {
        ImageFormat::Ico => encode_ico(img, writer),
        // JPEG has no alpha channel; the encoder rejects RGBA input
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8())
            .write_to(writer, format)
            .map(|()| written)
            .map_err(|e| BackendError::Encode(format!("JPEG: {e}"))),
        ImageFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8())
            .write_to(writer, format)
            .map(|()| written)
            .map_err(|e| BackendError::Encode(format!("WebP: {e}"))),
        other => img
            .write_to(writer, other)
            .map(|()| written)
            .map_err(|e| BackendError::Encode(format!("{other:?}: {e}"))),
    }
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions::new(image.width(), image.height())
    }

    fn crop(&self, image: &DynamicImage, region: CropRegion) -> Result<DynamicImage, BackendError> {
        let fits_x = region.x.checked_add(region.width).is_some_and(|r| r <= image.width());
        let fits_y = region.y.checked_add(region.height).is_some_and(|b| b <= image.height());
        if region.width == 0 || region.height == 0 || !fits_x || !fits_y {
            return Err(BackendError::InvalidRegion(format!(
                "{}x{}+{}+{} does not fit in {}x{}",
                region.width,
                region.height,
                region.x,
                region.y,
                image.width(),
                image.height()
            )));
        }
        Ok(image.crop_imm(region.x, region.y, region.width, region.height))
    }

    fn resize(&self, image: &DynamicImage, params: ResizeParams) -> DynamicImage {
        image.resize_exact(params.width, params.height, FilterType::Lanczos3)
    }

    fn save(&self, image: &DynamicImage, path: &Path) -> Result<Dimensions, BackendError> {
        // Resolve the format first so an unsupported path leaves nothing behind
        let format = output_format(path)?;
        let file = std::fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        let written = encode(image, format, &mut writer)?;
        writer.flush()?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    /// Create a gradient PNG with the given dimensions.
    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    fn load_dims(path: &Path) -> (u32, u32) {
        image::image_dimensions(path).unwrap()
    }

    #[test]
    fn output_format_by_extension() {
        assert_eq!(output_format(Path::new("a/icon.png")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("a/favicon.ICO")).unwrap(), ImageFormat::Ico);
        assert_eq!(output_format(Path::new("a/x.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            output_format(Path::new("a/icon.bmp")),
            Err(BackendError::UnsupportedFormat(msg)) if msg.starts_with("bmp ")
        ));
        assert!(output_format(Path::new("a/icon")).is_err());
    }

    #[test]
    fn unsupported_format_lists_accepted_extensions() {
        let err = output_format(Path::new("a/icon.gif")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported output format: gif (expected one of png, ico, jpg, jpeg, webp)"
        );
    }

    #[test]
    fn load_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.png");
        create_test_png(&path, 300, 200);

        let backend = RustBackend::new();
        let img = backend.load(&path).unwrap();
        assert_eq!(backend.dimensions(&img), Dimensions::new(300, 200));
    }

    #[test]
    fn load_sniffs_content_not_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.bin");
        create_test_png(&path, 64, 64);

        let img = RustBackend::new().load(&path).unwrap();
        assert_eq!(img.width(), 64);
    }

    #[test]
    fn load_nonexistent_file_is_io_error() {
        let result = RustBackend::new().load(Path::new("/nonexistent/logo.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn load_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = RustBackend::new().load(&path);
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn crop_keeps_interior_pixels() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(200, 200, |x, y| {
            image::Rgba([x as u8, y as u8, 0, 255])
        }));
        let backend = RustBackend::new();
        let cropped = backend
            .crop(
                &img,
                CropRegion {
                    x: 50,
                    y: 50,
                    width: 100,
                    height: 100,
                },
            )
            .unwrap();

        assert_eq!((cropped.width(), cropped.height()), (100, 100));
        let px = cropped.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(px, [50, 50, 0, 255]);
    }

    #[test]
    fn crop_outside_image_errors() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(80, 80));
        let result = RustBackend::new().crop(
            &img,
            CropRegion {
                x: 50,
                y: 50,
                width: 40,
                height: 10,
            },
        );
        assert!(matches!(result, Err(BackendError::InvalidRegion(_))));
    }

    #[test]
    fn resize_is_exact_and_ignores_aspect() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(400, 250));
        let resized = RustBackend::new().resize(
            &img,
            ResizeParams {
                width: 192,
                height: 192,
            },
        );
        assert_eq!((resized.width(), resized.height()), (192, 192));
    }

    #[test]
    fn save_png_round_trips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("icon.png");
        let img = DynamicImage::ImageRgba8(RgbaImage::new(512, 512));

        let written = RustBackend::new().save(&img, &out).unwrap();
        assert_eq!(written, Dimensions::new(512, 512));
        assert_eq!(load_dims(&out), (512, 512));
    }

    #[test]
    fn save_jpeg_drops_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("icon.jpg");
        let img = DynamicImage::ImageRgba8(RgbaImage::new(64, 64));

        RustBackend::new().save(&img, &out).unwrap();
        assert_eq!(load_dims(&out), (64, 64));
    }

    #[test]
    fn save_ico_writes_icon_container() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("favicon.ico");
        let img = DynamicImage::ImageRgba8(RgbaImage::new(512, 512));

        let written = RustBackend::new().save(&img, &out).unwrap();
        assert_eq!(written, Dimensions::new(256, 256));
        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[0..4], &[0, 0, 1, 0]);
        assert_eq!(load_dims(&out), (256, 256));
    }

    #[test]
    fn save_unsupported_format_creates_no_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("icon.bmp");
        let img = DynamicImage::ImageRgba8(RgbaImage::new(16, 16));

        let result = RustBackend::new().save(&img, &out);
        assert!(matches!(result, Err(BackendError::UnsupportedFormat(_))));
        assert!(!out.exists());
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("missing").join("icon.png");
        let img = DynamicImage::ImageRgba8(RgbaImage::new(16, 16));

        let result = RustBackend::new().save(&img, &out);
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
