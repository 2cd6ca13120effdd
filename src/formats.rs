//! Image format utilities and type-safe format handling
//!
//! Output formats are a closed set: every upload is re-encoded to either WebP
//! or JPEG, picked from the probed input format.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported output image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG, progressive with optimized coding
    Jpeg,
    /// Lossy WebP
    #[serde(rename = "webp")]
    WebP,
}

impl OutputFormat {
    /// Short name used in API responses
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

/// Picks the output format for a probed input format.
///
/// Palette and alpha-friendly inputs (PNG, WebP, GIF) go to WebP; everything
/// else the decoder understands goes to JPEG.
pub fn select_output_format(input: ImageFormat) -> OutputFormat {
    match input {
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Gif => OutputFormat::WebP,
        _ => OutputFormat::Jpeg,
    }
}

/// Lowercase name of an input format, as reported in logs and `info` output
pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        ImageFormat::Gif => "gif",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Ico => "ico",
        ImageFormat::Avif => "avif",
        ImageFormat::Pnm => "pnm",
        ImageFormat::Tga => "tga",
        ImageFormat::Dds => "dds",
        ImageFormat::Hdr => "hdr",
        ImageFormat::OpenExr => "exr",
        ImageFormat::Farbfeld => "farbfeld",
        ImageFormat::Qoi => "qoi",
        _ => "unknown",
    }
}
