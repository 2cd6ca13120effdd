use crate::error::{CompressionError, Result};
use crate::formats::{format_name, select_output_format, OutputFormat};
use crate::utils::format_file_size;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// Format and dimensions of an encoded image, read from its header only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageMetadata {
    /// Both dimensions, if the header reported usable (positive) values
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        if self.width > 0 && self.height > 0 {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    pub fn format_name(&self) -> &'static str {
        format_name(self.format)
    }

    pub fn output_format(&self) -> OutputFormat {
        select_output_format(self.format)
    }
}

/// Probes the format and dimensions of `data` without decoding pixel data.
///
/// Anything the decoder cannot recognise or whose header cannot be parsed is
/// reported as [`CompressionError::InvalidImage`].
pub fn read_metadata(data: &[u8]) -> Result<ImageMetadata> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| {
            tracing::debug!("Failed to guess image format: {}", e);
            CompressionError::InvalidImage
        })?;

    let format = reader.format().ok_or(CompressionError::InvalidImage)?;
    let (width, height) = reader.into_dimensions().map_err(|e| {
        tracing::debug!("Failed to read {} header: {}", format_name(format), e);
        CompressionError::InvalidImage
    })?;

    Ok(ImageMetadata {
        format,
        width,
        height,
    })
}

/// Prints the probed metadata of an encoded image and the output format the
/// compressor would choose for it.
pub fn print_image_info(label: &str, data: &[u8]) -> Result<()> {
    let metadata = read_metadata(data)?;
    let output = metadata.output_format();

    println!("📊 Analyzing image: {}", label);
    println!("📋 Basic Information:");
    println!("  📏 Dimensions: {}x{} pixels", metadata.width, metadata.height);
    println!(
        "  📦 File size: {} bytes ({})",
        data.len(),
        format_file_size(data.len() as u64)
    );
    println!("  🎭 Image format: {}", metadata.format_name());

    if metadata.height > 0 {
        let aspect_ratio = metadata.width as f64 / metadata.height as f64;
        println!("  📐 Aspect ratio: {:.2}:1", aspect_ratio);
    }

    println!("\n💡 Compression:");
    println!("  🎯 Output format: {} ({})", output, output.mime_type());

    Ok(())
}
