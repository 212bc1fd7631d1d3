//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how*. The [`pipeline`](crate::pipeline)
//! decides which crop and which variants it needs, and the
//! [`backend`](super::backend) does the pixel work. Keeping them apart lets the
//! pipeline run against a recording mock in tests.
//!
//! ## Types
//!
//! - [`Margin`]: Pixels removed from each of the four edges before resizing.
//! - [`Variant`]: The two fixed output sizes: large (512×512) and small (192×192).
//! - [`CropRegion`]: A rectangle inside the source image.
//! - [`ResizeParams`]: Exact target dimensions for a resize.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Fixed border width trimmed from every edge of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin(pub u32);

impl Margin {
    /// The 50px margin tuned for generated logo artwork with rounded corners.
    pub const DEFAULT: Margin = Margin(50);

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One of the two resized outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 512×512, used for `pwa-512x512.png`, `favicon.png`, `favicon.ico`.
    Large,
    /// 192×192, used for `pwa-192x192.png`.
    Small,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Large, Variant::Small];

    /// Edge length in pixels. Both variants are square.
    pub fn edge(self) -> u32 {
        match self {
            Variant::Large => 512,
            Variant::Small => 192,
        }
    }

    pub fn resize_params(self) -> ResizeParams {
        ResizeParams {
            width: self.edge(),
            height: self.edge(),
        }
    }

    /// Pick a variant from a file name: small iff the name contains `"192"`.
    ///
    /// Only the last path component is inspected, so a `192` in a directory
    /// name does not count. It is a plain substring match: `icon-1920.png`
    /// also selects [`Variant::Small`].
    pub fn from_filename(path: &Path) -> Variant {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if name.contains("192") {
            Variant::Small
        } else {
            Variant::Large
        }
    }

    /// Parse a variant name (`large` / `small`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Variant> {
        match name.to_ascii_lowercase().as_str() {
            "large" => Some(Variant::Large),
            "small" => Some(Variant::Small),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Large => "large",
            Variant::Small => "small",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rectangle to keep from the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Exact output dimensions for a resize. Aspect ratio is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_default_is_50() {
        assert_eq!(Margin::default().value(), 50);
    }

    #[test]
    fn variant_edges() {
        assert_eq!(Variant::Large.edge(), 512);
        assert_eq!(Variant::Small.edge(), 192);
        assert_eq!(
            Variant::Small.resize_params(),
            ResizeParams {
                width: 192,
                height: 192
            }
        );
    }

    #[test]
    fn from_filename_selects_small_on_192() {
        assert_eq!(
            Variant::from_filename(Path::new("public/pwa-192x192.png")),
            Variant::Small
        );
        assert_eq!(
            Variant::from_filename(Path::new("public/pwa-512x512.png")),
            Variant::Large
        );
        assert_eq!(
            Variant::from_filename(Path::new("public/favicon.ico")),
            Variant::Large
        );
    }

    #[test]
    fn from_filename_ignores_directories() {
        assert_eq!(
            Variant::from_filename(Path::new("/srv/192.168.1.1/favicon.png")),
            Variant::Large
        );
    }

    #[test]
    fn from_filename_is_a_plain_substring_match() {
        // icon-1920 is not a 192px icon, but the rule matches it anyway
        assert_eq!(
            Variant::from_filename(Path::new("icon-1920.png")),
            Variant::Small
        );
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Variant::from_name("Small"), Some(Variant::Small));
        assert_eq!(Variant::from_name("LARGE"), Some(Variant::Large));
        assert_eq!(Variant::from_name("medium"), None);
    }

    #[test]
    fn variant_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Variant::Small).unwrap(),
            "\"small\""
        );
    }
}
