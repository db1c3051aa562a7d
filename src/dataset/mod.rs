//! Video dataset enumeration and sample planning
//!
//! A dataset root holds one directory per video; low-resolution directories carry the `_l`
//! marker and contain one file per frame. Planning a sample picks a reference frame, resolves
//! its temporal window and turns the window into sibling frame paths. No frame data is read
//! here; see [`sample`] for assembly.

pub mod sample;
pub mod validate;

use crate::error::DatasetError;
use crate::naming::{ground_truth_path, is_low_resolution, FrameName};
use crate::window::{select_reference, ResolvedWindow, WindowConfig, WindowResolver};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub use sample::{
    pad_to_multiple, ArrayLoader, AugmentationRecord, FrameArray, Sample, SampleAssembler,
    WindowStack,
};
pub use validate::{IssueKind, ValidationIssue, ValidationReport};

/// Dataset location and per-sample options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding one sub-directory per video
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Ratio between ground-truth and input resolution
    #[serde(default = "default_upscale_factor")]
    pub upscale_factor: usize,

    /// Square input crop size; 0 keeps the full frame
    #[serde(default)]
    pub patch_size: usize,

    /// Random flips and rotation
    #[serde(default)]
    pub augmentation: bool,

    /// Shuffle the video order once at open time
    #[serde(default)]
    pub shuffle: bool,

    /// Frame file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./dataset/train")
}

fn default_upscale_factor() -> usize {
    4
}

fn default_extension() -> String {
    "npy".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            upscale_factor: default_upscale_factor(),
            patch_size: 0,
            augmentation: false,
            shuffle: false,
            extension: default_extension(),
        }
    }
}

impl DataConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir cannot be empty".to_string());
        }
        if self.upscale_factor == 0 {
            return Err("upscale_factor must be at least 1".to_string());
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(format!(
                "extension must be non-empty and given without a dot, got {:?}",
                self.extension
            ));
        }
        Ok(())
    }
}

/// One low-resolution video directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    pub dir: PathBuf,
    /// Frame files sorted by name
    pub frames: Vec<PathBuf>,
}

impl Video {
    pub fn name(&self) -> String {
        self.dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Everything needed to load one training sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplePlan {
    pub video: String,
    pub reference: PathBuf,
    pub ground_truth: PathBuf,
    /// Frame paths in window order
    pub window: Vec<PathBuf>,
    pub resolved: ResolvedWindow,
}

/// Enumerated dataset with a fixed window configuration
#[derive(Debug, Clone)]
pub struct VideoDataset {
    config: DataConfig,
    resolver: WindowResolver,
    seed: u64,
    videos: Vec<Video>,
}

impl VideoDataset {
    /// Enumerate the videos under `config.data_dir`.
    pub fn open(config: DataConfig, window: WindowConfig, seed: u64) -> Result<Self, DatasetError> {
        let resolver = WindowResolver::new(window)?;
        let mut videos = enumerate_videos(&config.data_dir, &config.extension)?;
        if config.shuffle {
            let mut rng = StdRng::seed_from_u64(seed);
            videos.shuffle(&mut rng);
        }
        info!(
            data_dir = %config.data_dir.display(),
            videos = videos.len(),
            n_frames = window.n_frames,
            padding = %window.padding,
            "Dataset opened"
        );
        Ok(Self {
            config,
            resolver,
            seed,
            videos,
        })
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    pub fn resolver(&self) -> &WindowResolver {
        &self.resolver
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Plan a sample for the video at `video_index`.
    pub fn plan_sample<R: Rng + ?Sized>(
        &self,
        video_index: usize,
        rng: &mut R,
    ) -> Result<SamplePlan, DatasetError> {
        let video = self
            .videos
            .get(video_index)
            .ok_or(DatasetError::VideoOutOfRange {
                index: video_index,
                count: self.videos.len(),
            })?;
        if video.frames.is_empty() {
            return Err(DatasetError::EmptyVideo(video.dir.clone()));
        }

        let position = select_reference(
            video.frames.len() as i64,
            self.resolver.window_size(),
            rng,
        )?;
        let reference = video.frames[position as usize].clone();
        self.plan_for_reference(video, reference)
    }

    /// Plan the sample whose reference frame is `reference`, a frame of `video`.
    pub fn plan_for_reference(
        &self,
        video: &Video,
        reference: PathBuf,
    ) -> Result<SamplePlan, DatasetError> {
        let name = FrameName::from_path(&reference)?;
        if !(0..=name.max_index()).contains(&name.frame_index()) {
            return Err(DatasetError::FrameOutOfRange {
                name: name.as_string(),
                index: name.frame_index(),
                max_index: name.max_index(),
            });
        }

        let resolved = self
            .resolver
            .resolve(name.video_length(), name.frame_index())?;
        let window = name
            .window_names(&resolved.indices)
            .into_iter()
            .map(|n| video.dir.join(n))
            .collect();

        debug!(
            video = %video.name(),
            reference = name.frame_index(),
            indices = ?resolved.indices,
            "Sample planned"
        );

        Ok(SamplePlan {
            video: video.name(),
            ground_truth: ground_truth_path(&reference),
            reference,
            window,
            resolved,
        })
    }

    /// One sample plan per video for `epoch`, computed on a worker pool.
    ///
    /// Each video draws from its own RNG seeded by `(seed, epoch, video index)`, so the result
    /// does not depend on `threads`. `threads == 0` uses the global rayon pool.
    pub fn plan_epoch(&self, epoch: u64, threads: usize) -> Result<Vec<SamplePlan>, DatasetError> {
        let plan_all = || {
            (0..self.videos.len())
                .into_par_iter()
                .map(|index| {
                    let mut rng = StdRng::seed_from_u64(sample_seed(self.seed, epoch, index));
                    self.plan_sample(index, &mut rng)
                })
                .collect::<Result<Vec<_>, _>>()
        };

        if threads == 0 {
            return plan_all();
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| DatasetError::WorkerPool(e.to_string()))?;
        pool.install(plan_all)
    }
}

/// Seed for one sample's RNG (splitmix64 finalizer over the mixed inputs).
pub fn sample_seed(seed: u64, epoch: u64, index: usize) -> u64 {
    let mut z = seed
        .wrapping_add(epoch.wrapping_mul(0x9e3779b97f4a7c15))
        .wrapping_add((index as u64).wrapping_mul(0xd1b54a32d192ed03));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Low-resolution video directories directly under `root`, sorted by path.
pub fn enumerate_videos(root: &Path, extension: &str) -> Result<Vec<Video>, DatasetError> {
    let mut videos = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !is_low_resolution(&name) {
            continue;
        }
        let dir = entry.path().to_path_buf();
        let frames = list_frames(&dir, extension)?;
        videos.push(Video { dir, frames });
    }
    videos.sort_by(|a, b| a.dir.cmp(&b.dir));
    Ok(videos)
}

fn list_frames(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DatasetError> {
    let mut frames = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|e| e.to_string_lossy() == extension)
            .unwrap_or(false);
        if matches {
            frames.push(entry.path().to_path_buf());
        }
    }
    frames.sort();
    Ok(frames)
}

fn walk_error(e: walkdir::Error) -> DatasetError {
    DatasetError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to walk dataset directory: {}", e),
    ))
}
