use crate::error::{CompressionError, Result};
use crate::info::ImageMetadata;

/// Checks the raw upload before any decoding is attempted.
pub fn validate_upload(data: &[u8], max_size: usize) -> Result<()> {
    if data.is_empty() {
        return Err(CompressionError::EmptyFile);
    }

    if data.len() > max_size {
        return Err(CompressionError::FileTooLarge(
            data.len() as u64,
            max_size as u64,
        ));
    }

    Ok(())
}

/// Rejects images whose header announces dimensions above `max_dimension`,
/// before the pixel buffer is allocated.
pub fn validate_dimensions(metadata: &ImageMetadata, max_dimension: u32) -> Result<()> {
    if metadata.width > max_dimension || metadata.height > max_dimension {
        return Err(CompressionError::InvalidDimensions(
            metadata.width,
            metadata.height,
            max_dimension,
        ));
    }
    Ok(())
}
