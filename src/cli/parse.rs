//! CLI parse: clap types for vsr-window. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vsr-window - temporal window planning for video super-resolution datasets
#[derive(Parser)]
#[command(name = "vsr-window")]
#[command(about = "Resolve temporal frame windows and plan samples for VSR datasets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (holds config/)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dataset directory (overrides data.data_dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the window around one reference frame
    Resolve {
        /// Frames in the video
        #[arg(long)]
        frames: i64,
        /// Reference frame index
        #[arg(long)]
        reference: i64,
        /// Window size (odd); defaults to window.n_frames
        #[arg(long)]
        window: Option<usize>,
        /// Padding policy (replicate, reflection, new_info, circle)
        #[arg(long)]
        padding: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the sibling frame names a frame file's window loads
    Names {
        /// Frame file name, e.g. Youku_00000_l_100_00_.npy
        file_name: String,
        /// Window size (odd); defaults to window.n_frames
        #[arg(long)]
        window: Option<usize>,
        /// Padding policy (replicate, reflection, new_info, circle)
        #[arg(long)]
        padding: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List videos and frame counts under the dataset directory
    Scan {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Plan one sample per video for an epoch
    Plan {
        /// Epoch number (mixed into each sample's seed)
        #[arg(long, default_value = "0")]
        epoch: u64,
        /// Worker threads; defaults to runtime.threads
        #[arg(long)]
        threads: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check that every plannable window exists on disk
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the effective configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
