use thiserror::Error;

#[derive(Error, Debug)]
pub enum PsdJsonError {
    #[error("PSD decoding failed: {0}")]
    Decode(String),

    #[error("Pixel buffer size mismatch for {width}x{height} image: expected {expected} bytes, found {actual}")]
    PixelBufferMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid base64 engine data: {0}")]
    InvalidEngineData(#[from] base64::DecodeError),

    #[error("PNG encoding failed: {0}")]
    PngError(#[from] image::ImageError),

    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("ZIP library error: {0}")]
    ZipLibraryError(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, PsdJsonError>;
