//! Configuration System
//!
//! Layered configuration for dataset location, window settings, runtime and logging.
//! Sources, lowest precedence first: built-in defaults, the global config file, the workspace
//! `config/` files, then `VSR_WINDOW_*` environment variables. The loaded value is immutable
//! and passed into each component by the caller.

use crate::dataset::DataConfig;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::window::WindowConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::ENV_PREFIX;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Dataset location and sample options
    #[serde(default)]
    pub data: DataConfig,

    /// Temporal window settings
    #[serde(default)]
    pub window: WindowConfig,

    /// Worker and seeding settings
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Worker pool and randomness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Planning worker threads; 0 uses one per core
    #[serde(default)]
    pub threads: usize,

    /// Seed for shuffling and reference selection
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    123
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            seed: default_seed(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Data(String),
    Window(String),
    Runtime(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Data(msg) => write!(f, "data: {}", msg),
            ValidationError::Window(msg) => write!(f, "window: {}", msg),
            ValidationError::Runtime(msg) => write!(f, "runtime: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Upper bound on planning threads.
const MAX_THREADS: usize = 1024;

impl RuntimeConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.threads > MAX_THREADS {
            return Err(format!(
                "threads must be at most {}, got {}",
                MAX_THREADS, self.threads
            ));
        }
        Ok(())
    }
}

impl PipelineConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.data.validate() {
            errors.push(ValidationError::Data(e));
        }
        if let Err(e) = self.window.validate() {
            errors.push(ValidationError::Window(e));
        }
        if let Err(e) = self.runtime.validate() {
            errors.push(ValidationError::Runtime(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::Output(e.to_string()))
    }
}
