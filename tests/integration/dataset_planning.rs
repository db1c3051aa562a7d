//! Planning, assembly and evaluation over an on-disk dataset

use crate::integration::test_utils::write_video;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tempfile::TempDir;
use vsr_window::dataset::{
    ArrayLoader, DataConfig, FrameArray, SampleAssembler, VideoDataset, WindowStack,
};
use vsr_window::error::DatasetError;
use vsr_window::metrics::evaluate;
use vsr_window::model::{Model, ModelOutput};
use vsr_window::naming::FrameName;
use vsr_window::window::{PaddingPolicy, WindowConfig};

const LR_SIDE: usize = 6;
const SCALE: usize = 4;

/// Constant frames whose value encodes the frame index; ground truth is larger by `SCALE`.
struct IndexLoader;

impl ArrayLoader for IndexLoader {
    fn load(&self, path: &Path) -> Result<FrameArray, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.display().to_string(),
            )));
        }
        let name = FrameName::from_path(path)?;
        let value = name.frame_index() as f32 / 100.0;
        let is_truth = path.to_string_lossy().contains("_h_GT");
        let side = if is_truth { LR_SIDE * SCALE } else { LR_SIDE };
        FrameArray::new(side, side, 1, vec![value; side * side])
    }
}

/// Nearest-neighbour upscale of the centre frame, offset by 0.1.
struct CenterUpscale;

impl Model for CenterUpscale {
    fn forward(&self, window: &WindowStack) -> ModelOutput {
        let [t, h, w, c] = window.shape();
        let center = match window.frame(t / 2) {
            Some(frame) => frame,
            None => return ModelOutput::Multiple(Vec::new()),
        };
        let mut data = Vec::with_capacity(h * w * SCALE * SCALE * c);
        for y in 0..h * SCALE {
            for x in 0..w * SCALE {
                data.extend(center.pixel(y / SCALE, x / SCALE).iter().map(|v| v + 0.1));
            }
        }
        match FrameArray::new(h * SCALE, w * SCALE, c, data) {
            Ok(frame) => ModelOutput::Multiple(vec![frame, FrameArray::zeros(1, 1, c)]),
            Err(_) => ModelOutput::Multiple(Vec::new()),
        }
    }
}

fn open(root: &Path, padding: PaddingPolicy) -> VideoDataset {
    let config = DataConfig {
        data_dir: root.to_path_buf(),
        upscale_factor: SCALE,
        ..DataConfig::default()
    };
    let window = WindowConfig {
        n_frames: 7,
        padding,
    };
    VideoDataset::open(config, window, 2024).unwrap()
}

#[test]
fn test_every_planned_reference_is_the_window_center() {
    let temp_dir = TempDir::new().unwrap();
    write_video(temp_dir.path(), "long", 40);
    write_video(temp_dir.path(), "short", 5);

    let dataset = open(temp_dir.path(), PaddingPolicy::Circle);
    for epoch in 0..10 {
        for plan in dataset.plan_epoch(epoch, 2).unwrap() {
            let center = plan.resolved.center();
            assert_eq!(plan.window[center], plan.reference);
            assert!(plan.resolved.is_in_bounds());
            if plan.video == "long_l" {
                assert!(!plan.resolved.fallback);
                let r = plan.resolved.ref_index;
                assert_eq!(plan.resolved.indices, ((r - 3)..=(r + 3)).collect::<Vec<_>>());
            } else {
                assert!(plan.resolved.fallback);
                assert_eq!(plan.resolved.effective, PaddingPolicy::Replicate);
            }
        }
    }
}

#[test]
fn test_epochs_differ_but_repeat() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..5 {
        write_video(temp_dir.path(), &format!("v{}", i), 60);
    }
    let dataset = open(temp_dir.path(), PaddingPolicy::Reflection);

    let first = dataset.plan_epoch(0, 0).unwrap();
    assert_eq!(first, dataset.plan_epoch(0, 3).unwrap());

    let references = |plans: &[vsr_window::dataset::SamplePlan]| -> Vec<i64> {
        plans.iter().map(|p| p.resolved.ref_index).collect()
    };
    let differs = (1..20).any(|epoch| {
        references(&dataset.plan_epoch(epoch, 0).unwrap()) != references(&first)
    });
    assert!(differs, "reference choice should vary between epochs");
}

#[test]
fn test_assemble_and_evaluate() {
    let temp_dir = TempDir::new().unwrap();
    write_video(temp_dir.path(), "clip", 12);
    write_video(temp_dir.path(), "tiny", 3);

    let dataset = open(temp_dir.path(), PaddingPolicy::NewInfo);
    let assembler = SampleAssembler::from_config(IndexLoader, dataset.config());
    let mut rng = StdRng::seed_from_u64(1);

    let samples: Vec<_> = dataset
        .plan_epoch(0, 1)
        .unwrap()
        .iter()
        .map(|plan| assembler.assemble(plan, &mut rng).unwrap())
        .collect();
    assert_eq!(samples.len(), 2);
    for sample in &samples {
        // 6x6 input is padded up to 8x8; ground truth follows at 4x.
        assert_eq!(sample.window.shape(), [7, 8, 8, 1]);
        assert_eq!(sample.ground_truth.shape(), [32, 32, 1]);
    }

    let summary = evaluate(&CenterUpscale, &samples);
    assert_eq!(summary.samples, 2);
    assert_eq!(summary.scored, 2);
    let mean = summary.mean_psnr.unwrap();
    assert!((mean - 20.0).abs() < 1e-3, "mean psnr {}", mean);
}

#[test]
fn test_assemble_fails_on_missing_frame() {
    let temp_dir = TempDir::new().unwrap();
    let lr = write_video(temp_dir.path(), "clip", 7);
    std::fs::remove_file(lr.join("clip_l_7_06_.npy")).unwrap();

    let dataset = open(temp_dir.path(), PaddingPolicy::Replicate);
    let video = &dataset.videos()[0];
    let plan = dataset
        .plan_for_reference(video, video.frames[3].clone())
        .unwrap();
    let assembler = SampleAssembler::from_config(IndexLoader, dataset.config());
    let err = assembler
        .assemble(&plan, &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert!(matches!(err, DatasetError::IoError(_)));
}
