//! Frame window resolution
//!
//! Maps the offsets `ref_index - half_width ..= ref_index + half_width` onto frame indices of a
//! video whose last frame is `max_index`. Offsets inside the video pass through; offsets past
//! either end are remapped once according to the padding policy.
//!
//! The remap is a single pass. With the short-video fallback in place (fewer frames than the
//! window means `Replicate`) every policy lands inside `[0, max_index]` on the first pass:
//! `max_index >= 2 * half_width` bounds each formula on both sides.

use crate::error::WindowError;
use crate::window::policy::PaddingPolicy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest accepted `max_index`; keeps every remap formula inside `i64`.
pub const MAX_EXTENT: i64 = 1 << 40;

/// Largest accepted window size; every resolved window is allocated in full.
pub const MAX_WINDOW: i64 = 1 << 16;

/// Number of frames in a window of the given half-width.
pub fn window_len(half_width: i64) -> i64 {
    2 * half_width + 1
}

/// Policy actually applied for a video.
///
/// A video with fewer frames than the window always resolves with `Replicate`, whatever the
/// caller asked for.
pub fn effective_policy(max_index: i64, half_width: i64, requested: PaddingPolicy) -> PaddingPolicy {
    if is_short_video(max_index, half_width) {
        PaddingPolicy::Replicate
    } else {
        requested
    }
}

fn is_short_video(max_index: i64, half_width: i64) -> bool {
    max_index + 1 < window_len(half_width)
}

fn validate(max_index: i64, ref_index: i64, half_width: i64) -> Result<(), WindowError> {
    if !(0..=MAX_EXTENT).contains(&max_index) {
        return Err(WindowError::InvalidArgument(format!(
            "max_index must be in [0, {}], got {}",
            MAX_EXTENT, max_index
        )));
    }
    if !(0..=MAX_WINDOW / 2).contains(&half_width) {
        return Err(WindowError::InvalidArgument(format!(
            "half_width must be in [0, {}], got {}",
            MAX_WINDOW / 2,
            half_width
        )));
    }
    if !(0..=max_index).contains(&ref_index) {
        return Err(WindowError::InvalidArgument(format!(
            "ref_index {} outside [0, {}]",
            ref_index, max_index
        )));
    }
    Ok(())
}

fn remap(i: i64, max_index: i64, ref_index: i64, half_width: i64, policy: PaddingPolicy) -> i64 {
    if i < 0 {
        match policy {
            PaddingPolicy::Replicate => 0,
            PaddingPolicy::Reflection => -i,
            PaddingPolicy::NewInfo => (ref_index + half_width) - i,
            PaddingPolicy::Circle => window_len(half_width) + i,
        }
    } else if i > max_index {
        match policy {
            PaddingPolicy::Replicate => max_index,
            PaddingPolicy::Reflection => 2 * max_index - i,
            PaddingPolicy::NewInfo => (ref_index - half_width) - (i - max_index),
            PaddingPolicy::Circle => i - window_len(half_width),
        }
    } else {
        i
    }
}

/// Resolve the temporal window around `ref_index`.
///
/// Returns exactly `2 * half_width + 1` indices, each in `[0, max_index]`.
pub fn resolve_window(
    max_index: i64,
    ref_index: i64,
    half_width: i64,
    policy: PaddingPolicy,
) -> Result<Vec<i64>, WindowError> {
    validate(max_index, ref_index, half_width)?;
    let policy = effective_policy(max_index, half_width, policy);

    Ok((ref_index - half_width..=ref_index + half_width)
        .map(|i| remap(i, max_index, ref_index, half_width, policy))
        .collect())
}

/// Same as [`resolve_window`] with the policy given by name.
pub fn resolve_window_named(
    max_index: i64,
    ref_index: i64,
    half_width: i64,
    policy: &str,
) -> Result<Vec<i64>, WindowError> {
    let policy: PaddingPolicy = policy.parse()?;
    resolve_window(max_index, ref_index, half_width, policy)
}

/// Window settings shared by every resolution in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Frames per window (odd)
    #[serde(default = "default_n_frames")]
    pub n_frames: usize,

    /// Requested padding policy
    #[serde(default)]
    pub padding: PaddingPolicy,
}

fn default_n_frames() -> usize {
    7
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            n_frames: default_n_frames(),
            padding: PaddingPolicy::default(),
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.n_frames == 0 {
            return Err("n_frames must be at least 1".to_string());
        }
        if self.n_frames % 2 == 0 {
            return Err(format!("n_frames must be odd, got {}", self.n_frames));
        }
        if self.n_frames as u64 > MAX_WINDOW as u64 {
            return Err(format!(
                "n_frames must be at most {}, got {}",
                MAX_WINDOW, self.n_frames
            ));
        }
        Ok(())
    }
}

/// Result of resolving one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedWindow {
    pub max_index: i64,
    pub ref_index: i64,
    pub indices: Vec<i64>,
    pub requested: PaddingPolicy,
    pub effective: PaddingPolicy,
    /// True when the short-video fallback replaced the requested policy
    pub fallback: bool,
}

impl ResolvedWindow {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_in_bounds(&self) -> bool {
        self.indices.iter().all(|i| (0..=self.max_index).contains(i))
    }

    /// Offset of the reference frame inside the window.
    pub fn center(&self) -> usize {
        self.indices.len() / 2
    }
}

/// Immutable resolver built from a validated [`WindowConfig`]
#[derive(Debug, Clone, Copy)]
pub struct WindowResolver {
    config: WindowConfig,
    half_width: i64,
}

impl WindowResolver {
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        config.validate().map_err(WindowError::Configuration)?;
        Ok(Self {
            config,
            half_width: (config.n_frames / 2) as i64,
        })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn half_width(&self) -> i64 {
        self.half_width
    }

    pub fn window_size(&self) -> i64 {
        window_len(self.half_width)
    }

    /// Resolve the window around `ref_index` in a video of `frame_count` frames.
    pub fn resolve(&self, frame_count: i64, ref_index: i64) -> Result<ResolvedWindow, WindowError> {
        if frame_count < 1 {
            return Err(WindowError::InvalidArgument(format!(
                "frame_count must be at least 1, got {}",
                frame_count
            )));
        }
        let max_index = frame_count - 1;
        let requested = self.config.padding;
        let effective = effective_policy(max_index, self.half_width, requested);
        let fallback = effective != requested;
        if fallback {
            debug!(
                frame_count,
                window = self.window_size(),
                requested = %requested,
                "Video shorter than window, using replicate padding"
            );
        }

        let indices = resolve_window(max_index, ref_index, self.half_width, requested)?;

        Ok(ResolvedWindow {
            max_index,
            ref_index,
            indices,
            requested,
            effective,
            fallback,
        })
    }
}
