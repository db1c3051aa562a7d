//! Error types for window resolution, dataset planning and the CLI surface.

use std::path::PathBuf;
use thiserror::Error;

/// Frame window resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Unrecognized padding policy or an unusable window configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller contract violation (negative sizes, reference index out of range)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Dataset enumeration and sample assembly errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Invalid frame file name {name:?}: {reason}")]
    FileName { name: String, reason: String },

    #[error("Video has no frames: {0:?}")]
    EmptyVideo(PathBuf),

    #[error("Video index {index} out of range ({count} videos)")]
    VideoOutOfRange { index: usize, count: usize },

    #[error("Frame index {index} outside [0, {max_index}] for {name:?}")]
    FrameOutOfRange {
        name: String,
        index: i64,
        max_index: i64,
    },

    #[error("Shape mismatch for {path:?}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        path: PathBuf,
        expected: [usize; 3],
        actual: [usize; 3],
    },

    #[error("Invalid frame array: {0}")]
    InvalidArray(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Dataset I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level errors for configuration, logging and command execution
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Output(err.to_string())
    }
}
