//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, WindowError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Window(WindowError::Configuration(msg)) => {
            format!("Configuration error: {}", msg)
        }
        ApiError::Window(WindowError::InvalidArgument(msg)) => {
            format!("Invalid argument: {}", msg)
        }
        other => other.to_string(),
    }
}

/// Numeric exit code per error category.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::ConfigError(_) | ApiError::Window(WindowError::Configuration(_)) => 2,
        ApiError::Window(WindowError::InvalidArgument(_)) => 3,
        ApiError::Dataset(_) => 4,
        _ => 1,
    }
}
