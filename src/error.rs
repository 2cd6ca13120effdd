use crate::constants::{
    EMPTY_FILE_MESSAGE, INVALID_IMAGE_MESSAGE, MISSING_FILE_MESSAGE, UNKNOWN_FAILURE_MESSAGE,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("{}", MISSING_FILE_MESSAGE)]
    MissingFile,

    #[error("{}", EMPTY_FILE_MESSAGE)]
    EmptyFile,

    #[error("{}", INVALID_IMAGE_MESSAGE)]
    InvalidImage,

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    /// The request body could not be read as multipart form data
    #[error("Failed to read multipart form data: {message}")]
    Multipart { status: StatusCode, message: String },

    #[error("Failed to compress image: {0}")]
    Encoding(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Anything that escaped the pipeline without a more specific kind
    #[error("{0}")]
    Unknown(String),
}

impl CompressionError {
    /// Wraps an unexpected failure, falling back to a generic message when the
    /// failure carried none.
    pub fn unknown(message: Option<String>) -> Self {
        match message {
            Some(message) if !message.trim().is_empty() => CompressionError::Unknown(message),
            _ => CompressionError::Unknown(UNKNOWN_FAILURE_MESSAGE.to_string()),
        }
    }

    /// Converts a failed blocking codec task, keeping the panic payload as the
    /// message when it is a string.
    pub fn from_join_error(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            let payload = err.into_panic();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned());
            CompressionError::unknown(message)
        } else {
            CompressionError::unknown(Some(err.to_string()))
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CompressionError::MissingFile
            | CompressionError::EmptyFile
            | CompressionError::InvalidImage
            | CompressionError::InvalidDimensions(..) => StatusCode::BAD_REQUEST,
            CompressionError::FileTooLarge(..) => StatusCode::PAYLOAD_TOO_LARGE,
            CompressionError::Multipart { status, .. } => *status,
            CompressionError::Encoding(_)
            | CompressionError::InvalidQuality(_)
            | CompressionError::Io(_)
            | CompressionError::FileNotFound(_)
            | CompressionError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub status_message: String,
    pub message: String,
}

impl From<&CompressionError> for ErrorBody {
    fn from(err: &CompressionError) -> Self {
        let status = err.status_code();
        Self {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for CompressionError {
    fn into_response(self) -> Response {
        match &self {
            CompressionError::Encoding(_)
            | CompressionError::Io(_)
            | CompressionError::Unknown(_) => {
                tracing::error!("Compression error: {}", self);
            }
            CompressionError::FileTooLarge(..) | CompressionError::Multipart { .. } => {
                tracing::warn!("Rejected upload: {}", self);
            }
            _ => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let body = ErrorBody::from(&self);
        (self.status_code(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
