//! Error types for glass

use thiserror::Error;

/// Result type for glass operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or preprocessing an image
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// EXIF metadata exists but a value could not be interpreted
    #[error("Malformed metadata: {0}")]
    MalformedMetadata(String),

    /// Failed to parse ICC profile
    #[error("Profile parse error: {0}")]
    ProfileParse(String),

    /// Pixel transform between two profiles failed
    #[error("Transform error: {0}")]
    Transform(String),

    /// Buffer size mismatch
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Image decoding or encoding failed
    #[error("Image codec error: {0}")]
    Decode(#[from] image::ImageError),

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
