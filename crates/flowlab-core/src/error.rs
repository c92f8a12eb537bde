use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },

    /// Dimensions are (width, height).
    #[error("Frame dimensions differ: previous {prev:?}, current {curr:?}")]
    DimensionMismatch {
        prev: (usize, usize),
        curr: (usize, usize),
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
