#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Opaque RGBA gradient, so encoders have something non-trivial to work on
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 3 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

/// Encodes `img` with the image crate's own encoder for `format`
pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let img = match format {
        // These encoders do not take an alpha channel
        ImageFormat::Jpeg | ImageFormat::Bmp => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img.clone(),
    };
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
}

pub fn sample_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    encode(&gradient(width, height), format)
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn write_sample_file(dir: &Path, name: &str, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, sample_bytes(48, 32, format)).unwrap();
    path
}
