//! Error types for QR generation and export

use crate::models::ErrorCorrection;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Content does not fit in any QR version at this level
    #[error("Content too long for error correction level {level}")]
    EncodingCapacityExceeded { level: ErrorCorrection },

    /// Any other refusal from the QR encoder
    #[error("Failed to encode QR code: {0}")]
    Encoding(String),

    /// Logo missing, unreadable or not a known image format
    #[error("Failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output file could not be encoded or written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::Encoding(e.to_string())
    }
}
