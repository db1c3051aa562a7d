//! Config loading facade: the single entry point for building a [`PipelineConfig`].

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::PipelineConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, workspace files and the environment.
    pub fn load(workspace_root: &Path) -> Result<PipelineConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize::<PipelineConfig>()?;
        Self::checked(config)
    }

    /// Load from defaults, one explicit file and the environment.
    pub fn load_from_file(path: &Path) -> Result<PipelineConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize::<PipelineConfig>()?;
        Self::checked(config)
    }

    fn checked(config: PipelineConfig) -> Result<PipelineConfig, ApiError> {
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
