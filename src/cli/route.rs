//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_names, format_plan, format_resolve, format_scan, format_validation,
};
use crate::config::{ConfigLoader, PipelineConfig};
use crate::dataset::{enumerate_videos, VideoDataset};
use crate::error::ApiError;
use crate::naming::FrameName;
use crate::window::{PaddingPolicy, WindowConfig, WindowResolver};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace and the loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: PipelineConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Some(dir) = data_dir {
            config.data.data_dir = dir;
        }
        Ok(Self::with_config(workspace_root, config))
    }

    /// Context over an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: PipelineConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Dataset directory; relative paths are taken from the workspace root.
    pub fn data_dir(&self) -> PathBuf {
        let dir = &self.config.data.data_dir;
        if dir.is_absolute() {
            dir.clone()
        } else {
            self.workspace_root.join(dir)
        }
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        debug!(
            command = command_name(command),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Resolve {
                frames,
                reference,
                window,
                padding,
                format,
            } => {
                let resolver = self.resolver(*window, padding.as_deref())?;
                let resolved = resolver.resolve(*frames, *reference)?;
                format_resolve(&resolved, format)
            }
            Commands::Names {
                file_name,
                window,
                padding,
                format,
            } => {
                let resolver = self.resolver(*window, padding.as_deref())?;
                let name = FrameName::parse(file_name).map_err(ApiError::Dataset)?;
                let resolved = resolver.resolve(name.video_length(), name.frame_index())?;
                let names = name.window_names(&resolved.indices);
                format_names(&resolved, &names, format)
            }
            Commands::Scan { format } => {
                let data_dir = self.data_dir();
                let videos = enumerate_videos(&data_dir, &self.config.data.extension)?;
                info!(videos = videos.len(), "Scan complete");
                format_scan(&data_dir, &videos, format)
            }
            Commands::Plan {
                epoch,
                threads,
                format,
            } => {
                let dataset = self.open_dataset()?;
                let threads = threads.unwrap_or(self.config.runtime.threads);
                let plans = dataset.plan_epoch(*epoch, threads)?;
                info!(epoch, samples = plans.len(), "Epoch planned");
                format_plan(*epoch, &plans, format)
            }
            Commands::Validate { format } => {
                let dataset = self.open_dataset()?;
                let report = dataset.validate();
                format_validation(&report, format)
            }
            Commands::Config { format } => match format.as_str() {
                "json" => Ok(serde_json::to_string_pretty(&self.config)?),
                _ => self.config.to_toml(),
            },
        }
    }

    fn resolver(
        &self,
        window: Option<usize>,
        padding: Option<&str>,
    ) -> Result<WindowResolver, ApiError> {
        let mut config: WindowConfig = self.config.window;
        if let Some(n_frames) = window {
            config.n_frames = n_frames;
        }
        if let Some(padding) = padding {
            config.padding = padding.parse::<PaddingPolicy>()?;
        }
        Ok(WindowResolver::new(config)?)
    }

    fn open_dataset(&self) -> Result<VideoDataset, ApiError> {
        let mut data = self.config.data.clone();
        data.data_dir = self.data_dir();
        Ok(VideoDataset::open(
            data,
            self.config.window,
            self.config.runtime.seed,
        )?)
    }
}

/// Stable command name for logs.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Resolve { .. } => "resolve",
        Commands::Names { .. } => "names",
        Commands::Scan { .. } => "scan",
        Commands::Plan { .. } => "plan",
        Commands::Validate { .. } => "validate",
        Commands::Config { .. } => "config",
    }
}
