use crate::constants::{
    DEFAULT_JPEG_QUALITY, DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_WEBP_QUALITY, MAX_IMAGE_DIMENSION,
    MAX_QUALITY, MIN_QUALITY, WEBP_MAX_DIMENSION,
};
use crate::error::{CompressionError, Result};
use crate::formats::OutputFormat;
use crate::info::{read_metadata, ImageMetadata};
use crate::utils::{create_progress_spinner, print_compression_result, validate_file_exists};
use crate::validation::{validate_dimensions, validate_upload};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use mozjpeg::{ColorSpace, Compress};
use std::fs;
use std::path::{Path, PathBuf};

/// Encoder settings and safety limits applied to every image
#[derive(Debug, Clone)]
pub struct CompressionOptions {
    pub webp_quality: u8,
    pub jpeg_quality: u8,
    pub max_file_size: usize,
    pub max_dimension: u32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            webp_quality: DEFAULT_WEBP_QUALITY,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_file_size: DEFAULT_MAX_UPLOAD_SIZE,
            max_dimension: MAX_IMAGE_DIMENSION,
        }
    }
}

impl CompressionOptions {
    pub fn new(webp_quality: Option<u8>, jpeg_quality: Option<u8>) -> Result<Self> {
        let webp_quality = validate_quality(webp_quality.unwrap_or(DEFAULT_WEBP_QUALITY))?;
        let jpeg_quality = validate_quality(jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY))?;

        Ok(Self {
            webp_quality,
            jpeg_quality,
            ..Self::default()
        })
    }

    pub fn with_limits(mut self, max_file_size: usize, max_dimension: u32) -> Self {
        self.max_file_size = max_file_size;
        self.max_dimension = max_dimension;
        self
    }

    pub fn quality_for(&self, format: OutputFormat) -> u8 {
        match format {
            OutputFormat::WebP => self.webp_quality,
            OutputFormat::Jpeg => self.jpeg_quality,
        }
    }
}

fn validate_quality(quality: u8) -> Result<u8> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(CompressionError::InvalidQuality(quality));
    }
    Ok(quality)
}

/// Result of a successful re-encode
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    pub original_size: usize,
    pub metadata: ImageMetadata,
    pub width: u32,
    pub height: u32,
}

impl CompressedImage {
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Core image processing pipeline:
/// validate -> probe -> pick format -> decode -> resize -> encode
///
/// # Returns
/// * `Ok(CompressedImage)` - The encoded bytes along with sizes and formats
/// * `Err(CompressionError)` - Client errors (empty, unreadable, oversized) or
///   an [`CompressionError::Encoding`] failure from the codecs
///
/// This is CPU-bound; async callers should run it on a blocking thread.
pub fn compress_bytes(data: &[u8], options: &CompressionOptions) -> Result<CompressedImage> {
    validate_upload(data, options.max_file_size)?;

    let metadata = read_metadata(data)?;
    let format = metadata.output_format();
    let max_dimension = match format {
        OutputFormat::WebP => options.max_dimension.min(WEBP_MAX_DIMENSION),
        OutputFormat::Jpeg => options.max_dimension,
    };
    validate_dimensions(&metadata, max_dimension)?;

    tracing::debug!(
        input_format = metadata.format_name(),
        width = metadata.width,
        height = metadata.height,
        output_format = format.name(),
        "Probed image"
    );

    let mut img = image::load_from_memory_with_format(data, metadata.format)
        .map_err(|e| CompressionError::Encoding(e.to_string()))?;

    if let Some((width, height)) = metadata.dimensions() {
        img = resize_to_fit(img, width, height);
    }

    let encoded = encode_image(&img, format, options.quality_for(format))?;
    let (width, height) = img.dimensions();

    Ok(CompressedImage {
        data: encoded,
        format,
        original_size: data.len(),
        metadata,
        width,
        height,
    })
}

/// Resizes `img` to fit inside `max_width` x `max_height`, keeping its aspect
/// ratio. Images already inside the bounds are returned untouched.
pub fn resize_to_fit(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if max_width == 0 || max_height == 0 {
        return img;
    }

    let (width, height) = img.dimensions();
    if width <= max_width && height <= max_height {
        return img;
    }

    tracing::debug!(
        "Resizing {}x{} to fit inside {}x{}",
        width,
        height,
        max_width,
        max_height
    );
    img.resize(max_width, max_height, FilterType::Lanczos3)
}

pub fn encode_image(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    match format {
        OutputFormat::WebP => encode_webp(img, quality),
        OutputFormat::Jpeg => encode_jpeg(img, quality),
    }
}

/// Lossy WebP through libwebp
pub fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
    let memory = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| CompressionError::Encoding(format!("WebP encoder failed: {:?}", e)))?;

    Ok(memory.to_vec())
}

/// Progressive JPEG through mozjpeg, with optimized Huffman tables and scans
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha channel; it is dropped here
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut comp = Compress::new(ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(quality as f32);
    comp.set_progressive_mode();
    comp.set_optimize_coding(true);
    comp.set_optimize_scans(true);

    let to_encoding_error = |e: std::io::Error| CompressionError::Encoding(e.to_string());

    let mut started = comp
        .start_compress(Vec::new())
        .map_err(to_encoding_error)?;
    started
        .write_scanlines(rgb.as_raw())
        .map_err(to_encoding_error)?;
    started.finish().map_err(to_encoding_error)
}

/// Output path used when none is given: the input path with the extension of
/// the chosen output format.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let file_name = if input.extension().and_then(|e| e.to_str()) == Some(format.extension()) {
        format!("{}.compressed.{}", stem, format.extension())
    } else {
        format!("{}.{}", stem, format.extension())
    };
    input.with_file_name(file_name)
}

/// Compresses a file on disk with the same pipeline as the HTTP endpoint.
///
/// Returns the path the result was written to.
pub fn compress_file(
    input: &Path,
    output: Option<&Path>,
    options: &CompressionOptions,
) -> Result<PathBuf> {
    validate_file_exists(input)?;
    println!("🗜️  Compressing image: {:?}", input);

    let pb = create_progress_spinner("Compressing image...");
    let data = fs::read(input)?;
    let compressed = compress_bytes(&data, options);
    pb.finish_and_clear();
    let compressed = compressed?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, compressed.format));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, &compressed.data)?;

    println!(
        "🎭 {} {}x{} -> {} {}x{}",
        compressed.metadata.format_name(),
        compressed.metadata.width,
        compressed.metadata.height,
        compressed.format,
        compressed.width,
        compressed.height
    );
    print_compression_result(compressed.original_size as u64, compressed.size() as u64);
    println!("📁 Output: {:?}", output);

    Ok(output)
}
