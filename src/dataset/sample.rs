//! Sample assembly: load a planned window, crop, augment, pad and stack it.

use crate::dataset::SamplePlan;
use crate::error::DatasetError;
use rand::Rng;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Spatial multiple the input window is padded to.
pub const PAD_MULTIPLE: usize = 4;

/// A single `height x width x channels` frame with values in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameArray {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<f32>,
}

impl FrameArray {
    pub fn new(
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, DatasetError> {
        if data.len() != height * width * channels {
            return Err(DatasetError::InvalidArray(format!(
                "{}x{}x{} frame needs {} values, got {}",
                height,
                width,
                channels,
                height * width * channels,
                data.len()
            )));
        }
        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    /// Frame from 8-bit samples, scaled into `[0, 1]`.
    pub fn from_u8(
        height: usize,
        width: usize,
        channels: usize,
        bytes: &[u8],
    ) -> Result<Self, DatasetError> {
        let data = bytes.iter().map(|&b| f32::from(b) / 255.0).collect();
        Self::new(height, width, channels, data)
    }

    pub fn zeros(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
            data: vec![0.0; height * width * channels],
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.height, self.width, self.channels]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    fn offset(&self, y: usize, x: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    pub fn pixel(&self, y: usize, x: usize) -> &[f32] {
        let start = self.offset(y, x);
        &self.data[start..start + self.channels]
    }

    fn remap_pixels(&self, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let (sy, sx) = source(y, x);
                data.extend_from_slice(self.pixel(sy, sx));
            }
        }
        Self { data, ..*self }
    }

    pub fn flip_horizontal(&self) -> Self {
        let w = self.width;
        self.remap_pixels(|y, x| (y, w - 1 - x))
    }

    pub fn flip_vertical(&self) -> Self {
        let h = self.height;
        self.remap_pixels(|y, x| (h - 1 - y, x))
    }

    pub fn rotate_180(&self) -> Self {
        let (h, w) = (self.height, self.width);
        self.remap_pixels(|y, x| (h - 1 - y, w - 1 - x))
    }

    /// Copy of the `height x width` region starting at `(top, left)`.
    pub fn crop(
        &self,
        top: usize,
        left: usize,
        height: usize,
        width: usize,
    ) -> Result<Self, DatasetError> {
        if top + height > self.height || left + width > self.width {
            return Err(DatasetError::InvalidArray(format!(
                "crop {}x{} at ({}, {}) exceeds {}x{} frame",
                height, width, top, left, self.height, self.width
            )));
        }
        let mut data = Vec::with_capacity(height * width * self.channels);
        for y in top..top + height {
            let start = self.offset(y, left);
            data.extend_from_slice(&self.data[start..start + width * self.channels]);
        }
        Ok(Self {
            height,
            width,
            channels: self.channels,
            data,
        })
    }

    /// Zero-pad `bottom` rows and `right` columns.
    pub fn pad(&self, bottom: usize, right: usize) -> Self {
        let mut padded = Self::zeros(self.height + bottom, self.width + right, self.channels);
        let row = self.width * self.channels;
        for y in 0..self.height {
            let src = y * row;
            let dst = padded.offset(y, 0);
            padded.data[dst..dst + row].copy_from_slice(&self.data[src..src + row]);
        }
        padded
    }
}

/// Rows and columns needed to round `height x width` up to `multiple`.
pub fn pad_to_multiple(height: usize, width: usize, multiple: usize) -> (usize, usize) {
    if multiple <= 1 {
        return (0, 0);
    }
    let round = |n: usize| (multiple - n % multiple) % multiple;
    (round(height), round(width))
}

/// Frames of one window stacked as `frames x height x width x channels`
#[derive(Debug, Clone, PartialEq)]
pub struct WindowStack {
    frames: usize,
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<f32>,
}

impl WindowStack {
    pub fn stack(frames: &[FrameArray]) -> Result<Self, DatasetError> {
        let first = frames
            .first()
            .ok_or_else(|| DatasetError::InvalidArray("cannot stack an empty window".to_string()))?;
        let [height, width, channels] = first.shape();
        let mut data = Vec::with_capacity(frames.len() * first.data.len());
        for frame in frames {
            if frame.shape() != first.shape() {
                return Err(DatasetError::InvalidArray(format!(
                    "window frames differ in shape: {:?} vs {:?}",
                    first.shape(),
                    frame.shape()
                )));
            }
            data.extend_from_slice(&frame.data);
        }
        Ok(Self {
            frames: frames.len(),
            height,
            width,
            channels,
            data,
        })
    }

    pub fn shape(&self) -> [usize; 4] {
        [self.frames, self.height, self.width, self.channels]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Frame `t` of the window as its own array.
    pub fn frame(&self, t: usize) -> Option<FrameArray> {
        if t >= self.frames {
            return None;
        }
        let len = self.height * self.width * self.channels;
        Some(FrameArray {
            height: self.height,
            width: self.width,
            channels: self.channels,
            data: self.data[t * len..(t + 1) * len].to_vec(),
        })
    }
}

/// Reads one frame file into memory
pub trait ArrayLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<FrameArray, DatasetError>;
}

/// Augmentations applied to a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AugmentationRecord {
    pub flip_h: bool,
    pub flip_v: bool,
    pub rotate_180: bool,
}

/// A loaded training pair
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub window: WindowStack,
    pub ground_truth: FrameArray,
    pub augmentation: AugmentationRecord,
}

/// Turns [`SamplePlan`]s into [`Sample`]s through an [`ArrayLoader`]
pub struct SampleAssembler<L: ArrayLoader> {
    loader: L,
    upscale_factor: usize,
    patch_size: usize,
    augmentation: bool,
}

impl<L: ArrayLoader> SampleAssembler<L> {
    pub fn new(loader: L, upscale_factor: usize, patch_size: usize, augmentation: bool) -> Self {
        Self {
            loader,
            upscale_factor: upscale_factor.max(1),
            patch_size,
            augmentation,
        }
    }

    pub fn from_config(loader: L, config: &crate::dataset::DataConfig) -> Self {
        Self::new(
            loader,
            config.upscale_factor,
            config.patch_size,
            config.augmentation,
        )
    }

    pub fn assemble<R: Rng + ?Sized>(
        &self,
        plan: &SamplePlan,
        rng: &mut R,
    ) -> Result<Sample, DatasetError> {
        let mut frames = plan
            .window
            .iter()
            .map(|path| self.loader.load(path))
            .collect::<Result<Vec<_>, _>>()?;
        let mut truth = self.loader.load(&plan.ground_truth)?;

        let [height, width, channels] = match frames.first() {
            Some(first) => first.shape(),
            None => {
                return Err(DatasetError::InvalidArray(
                    "plan has an empty window".to_string(),
                ))
            }
        };
        for (frame, path) in frames.iter().zip(&plan.window) {
            if frame.shape() != [height, width, channels] {
                return Err(DatasetError::ShapeMismatch {
                    path: path.clone(),
                    expected: [height, width, channels],
                    actual: frame.shape(),
                });
            }
        }
        let scale = self.upscale_factor;
        let expected_truth = [height * scale, width * scale, channels];
        if truth.shape() != expected_truth {
            return Err(DatasetError::ShapeMismatch {
                path: plan.ground_truth.clone(),
                expected: expected_truth,
                actual: truth.shape(),
            });
        }

        if self.patch_size > 0 && self.patch_size <= height && self.patch_size <= width {
            let p = self.patch_size;
            let top = rng.gen_range(0..=height - p);
            let left = rng.gen_range(0..=width - p);
            frames = frames
                .iter()
                .map(|f| f.crop(top, left, p, p))
                .collect::<Result<Vec<_>, _>>()?;
            truth = truth.crop(top * scale, left * scale, p * scale, p * scale)?;
        } else if self.patch_size > 0 {
            warn!(
                patch_size = self.patch_size,
                height,
                width,
                video = %plan.video,
                "Patch larger than frame, using the full frame"
            );
        }

        let mut record = AugmentationRecord::default();
        if self.augmentation {
            if rng.gen_bool(0.5) {
                frames = frames.iter().map(FrameArray::flip_horizontal).collect();
                truth = truth.flip_horizontal();
                record.flip_h = true;
            }
            if rng.gen_bool(0.5) {
                frames = frames.iter().map(FrameArray::flip_vertical).collect();
                truth = truth.flip_vertical();
                record.flip_v = true;
            }
            if rng.gen_bool(0.5) {
                frames = frames.iter().map(FrameArray::rotate_180).collect();
                truth = truth.rotate_180();
                record.rotate_180 = true;
            }
        }

        let [h, w, _] = frames[0].shape();
        let (bottom, right) = pad_to_multiple(h, w, PAD_MULTIPLE);
        if bottom > 0 || right > 0 {
            frames = frames.iter().map(|f| f.pad(bottom, right)).collect();
            truth = truth.pad(bottom * scale, right * scale);
        }

        Ok(Sample {
            window: WindowStack::stack(&frames)?,
            ground_truth: truth,
            augmentation: record,
        })
    }
}
