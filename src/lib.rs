pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod formats;
pub mod info;
pub mod logger;
pub mod processing;
pub mod server;
pub mod utils;
pub mod validation;

pub use api::{compress_upload, read_image_field, AppState, CompressResponse, Upload};
pub use config::ServerConfig;
pub use error::{CompressionError, ErrorBody, Result};
pub use formats::{select_output_format, OutputFormat};
pub use info::{read_metadata, ImageMetadata};
pub use processing::{
    compress_bytes, compress_file, encode_jpeg, encode_webp, resize_to_fit, CompressedImage,
    CompressionOptions,
};
pub use server::{build_router, serve};
