//! Reference frame selection for training samples.

use crate::error::WindowError;
use rand::Rng;
use std::ops::RangeInclusive;

/// Range a reference index is drawn from.
///
/// When the video holds at least a full window the range keeps `half_width` frames of margin on
/// both sides, so the window needs no padding. Shorter videos use every frame and rely on the
/// replicate fallback.
pub fn reference_range(
    frame_count: i64,
    window_size: i64,
) -> Result<RangeInclusive<i64>, WindowError> {
    if frame_count < 1 {
        return Err(WindowError::InvalidArgument(format!(
            "frame_count must be at least 1, got {}",
            frame_count
        )));
    }
    if window_size < 1 || window_size % 2 == 0 {
        return Err(WindowError::InvalidArgument(format!(
            "window_size must be a positive odd number, got {}",
            window_size
        )));
    }

    let half_width = window_size / 2;
    if frame_count >= window_size {
        Ok(half_width..=frame_count - 1 - half_width)
    } else {
        Ok(0..=frame_count - 1)
    }
}

/// Draw a reference index uniformly from [`reference_range`].
pub fn select_reference<R: Rng + ?Sized>(
    frame_count: i64,
    window_size: i64,
    rng: &mut R,
) -> Result<i64, WindowError> {
    let range = reference_range(frame_count, window_size)?;
    Ok(rng.gen_range(range))
}
