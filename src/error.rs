//! Canvas error types

use thiserror::Error;

/// Errors raised at the fallible boundaries of the canvas (codec, config, snapshots).
///
/// Painting itself never fails; see [`crate::canvas::PaintingCanvas`].
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<lz4_flex::block::DecompressError> for CanvasError {
    fn from(e: lz4_flex::block::DecompressError) -> Self {
        CanvasError::Snapshot(e.to_string())
    }
}

impl From<CanvasError> for String {
    fn from(e: CanvasError) -> Self {
        e.to_string()
    }
}
