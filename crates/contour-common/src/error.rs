//! Error types for the contour pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Primary error type for contour extraction.
#[derive(Debug, Error)]
pub enum ContourError {
    // === Resource Errors ===
    #[error("Unable to allocate memory for {what} ({bytes} bytes)")]
    Allocation { what: &'static str, bytes: usize },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),

    // === Configuration Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Raster Errors ===
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("Buffer does not match image dimensions: {0}")]
    DimensionMismatch(String),

    // === Tile Set Errors ===
    #[error("Contour tile {index} not found at {path}")]
    MissingTile { index: usize, path: PathBuf },

    #[error("Invalid contour tile {index}: {message}")]
    InvalidTile { index: usize, message: String },
}

impl ContourError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a Decode error for the given file.
    pub fn decode(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create an Encode error for the given file.
    pub fn encode(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Encode {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Whether the run must abort without any recovery attempt.
    ///
    /// Every error is fatal to a run; this only separates resource exhaustion
    /// from bad input for diagnostics.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, Self::Allocation { .. } | Self::WorkerPool(_))
    }
}
