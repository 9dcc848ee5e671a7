use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeedCountError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid calibration input: {parameter} = {value} (must be positive and finite)")]
    InvalidCalibration { parameter: &'static str, value: f64 },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, WeedCountError>;
