use std::path::PathBuf;
use thiserror::Error;

/// The main error type for imgsign operations.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("Failed to read image {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode image for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Embedded font could not be parsed: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl SignError {
    /// Returns true if the error happened while producing the output file.
    pub fn is_output_error(&self) -> bool {
        matches!(self, SignError::Output { .. } | SignError::Encode { .. })
    }

    /// Returns true if the error was caused by the source image.
    pub fn is_input_error(&self) -> bool {
        matches!(self, SignError::Input { .. })
    }
}
