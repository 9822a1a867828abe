//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode or encode error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Path does not name a usable file.
    #[error("invalid or missing file: {0}")]
    InvalidPath(String),

    /// Raster cannot be represented in the requested image format.
    #[error("invalid image format: {0}")]
    InvalidFormat(String),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] spotcount_core::Error),
}
