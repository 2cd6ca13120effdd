pub const DEFAULT_WEBP_QUALITY: u8 = 85;
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Largest accepted width or height, in pixels
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

/// libwebp refuses to encode a side longer than this
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Default request body limit (25MB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 25 * 1024 * 1024;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

pub const COMPRESS_ROUTE: &str = "/api/compress";
pub const HEALTH_ROUTE: &str = "/healthz";

/// Multipart field carrying the uploaded file
pub const IMAGE_FIELD: &str = "image";

pub const MISSING_FILE_MESSAGE: &str = "No image file provided";
pub const EMPTY_FILE_MESSAGE: &str = "Empty file provided";
pub const INVALID_IMAGE_MESSAGE: &str =
    "Invalid image file. Please ensure the file is a valid image format.";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Failed to compress image";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
