//! HTTP surface: the multipart upload handler and its response type.

use crate::constants::IMAGE_FIELD;
use crate::error::{CompressionError, Result};
use crate::formats::OutputFormat;
use crate::processing::{compress_bytes, CompressedImage, CompressionOptions};
use crate::utils::calculate_compression_ratio;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, multipart::MultipartRejection, Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Shared, read-only state handed to every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub options: Arc<CompressionOptions>,
}

impl AppState {
    pub fn new(options: CompressionOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }
}

/// Successful compression, as returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressResponse {
    /// Base64 (standard alphabet, padded) of the encoded image
    pub compressed: String,
    pub mime_type: String,
    /// Length of the encoded image in bytes
    pub size: usize,
    /// Length of the uploaded file in bytes
    pub original_size: usize,
    pub format: OutputFormat,
}

impl From<CompressedImage> for CompressResponse {
    fn from(image: CompressedImage) -> Self {
        Self {
            compressed: STANDARD.encode(&image.data),
            mime_type: image.mime_type().to_string(),
            size: image.size(),
            original_size: image.original_size,
            format: image.format,
        }
    }
}

/// The file taken from the `image` field of a multipart body
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub data: Bytes,
}

fn multipart_error(err: MultipartError) -> CompressionError {
    CompressionError::Multipart {
        status: err.status(),
        message: err.body_text(),
    }
}

/// Reads fields until the first `image` field and returns its content.
///
/// Other fields are skipped. A body without an `image` field yields
/// [`CompressionError::MissingFile`], an empty one [`CompressionError::EmptyFile`].
pub async fn read_image_field(multipart: &mut Multipart) -> Result<Upload> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let data = field.bytes().await.map_err(multipart_error)?;

        if data.is_empty() {
            return Err(CompressionError::EmptyFile);
        }

        return Ok(Upload { file_name, data });
    }

    Err(CompressionError::MissingFile)
}

/// `POST /api/compress`
///
/// Re-encodes the uploaded image to WebP (PNG, WebP and GIF inputs) or JPEG
/// (everything else) and returns it base64 encoded.
pub async fn compress_upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<CompressResponse>> {
    let mut multipart = multipart.map_err(|rejection| CompressionError::Multipart {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    let upload = read_image_field(&mut multipart).await?;
    let file_name = upload.file_name.unwrap_or_else(|| IMAGE_FIELD.to_string());

    tracing::debug!(
        file_name = %file_name,
        size = upload.data.len(),
        "Received upload"
    );

    let start = Instant::now();
    let options = Arc::clone(&state.options);
    let data = upload.data;
    let compressed = tokio::task::spawn_blocking(move || compress_bytes(&data, &options))
        .await
        .map_err(CompressionError::from_join_error)??;

    tracing::info!(
        file_name = %file_name,
        input_format = compressed.metadata.format_name(),
        output_format = compressed.format.name(),
        original_size = compressed.original_size,
        compressed_size = compressed.size(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Compressed image ({:.1}% reduction)",
        calculate_compression_ratio(compressed.original_size as u64, compressed.size() as u64)
    );

    Ok(Json(CompressResponse::from(compressed)))
}
