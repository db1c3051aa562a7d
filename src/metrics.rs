//! PSNR for evaluating predictions against ground truth.

use crate::dataset::Sample;
use crate::model::Model;
use serde::Serialize;
use tracing::debug;

/// Peak value of frames normalized to `[0, 1]`.
pub const UNIT_PEAK: f64 = 1.0;

/// Peak signal-to-noise ratio in dB; `None` when lengths differ or inputs are empty.
///
/// Identical inputs give `f64::INFINITY`.
pub fn psnr(a: &[f32], b: &[f32], peak: f64) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum();
    let mse = sum / a.len() as f64;
    if mse == 0.0 {
        return Some(f64::INFINITY);
    }
    Some(20.0 * (peak / mse.sqrt()).log10())
}

/// PSNR per sample and their mean
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvalSummary {
    pub samples: usize,
    pub scored: usize,
    pub mean_psnr: Option<f64>,
    pub per_sample: Vec<Option<f64>>,
}

/// Run `model` over `samples` and score each prediction against its ground truth.
///
/// Samples whose prediction is missing or has the wrong shape score `None` and are left out
/// of the mean.
pub fn evaluate<'a, M, I>(model: &M, samples: I) -> EvalSummary
where
    M: Model + ?Sized,
    I: IntoIterator<Item = &'a Sample>,
{
    let mut summary = EvalSummary::default();
    let mut total = 0.0;
    for (i, sample) in samples.into_iter().enumerate() {
        let output = model.forward(&sample.window);
        let score = output.prediction().and_then(|pred| {
            if pred.shape() != sample.ground_truth.shape() {
                return None;
            }
            psnr(pred.data(), sample.ground_truth.data(), UNIT_PEAK)
        });
        debug!(sample = i, psnr = ?score, "Sample evaluated");
        if let Some(value) = score {
            total += value;
            summary.scored += 1;
        }
        summary.samples += 1;
        summary.per_sample.push(score);
    }
    if summary.scored > 0 {
        summary.mean_psnr = Some(total / summary.scored as f64);
    }
    summary
}
