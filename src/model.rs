//! Model seam: the network is an external collaborator that maps a window to a prediction.

use crate::dataset::{FrameArray, WindowStack};

/// Output of a forward pass: a prediction, or a list whose first element is the prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Single(FrameArray),
    Multiple(Vec<FrameArray>),
}

impl ModelOutput {
    pub fn prediction(&self) -> Option<&FrameArray> {
        match self {
            ModelOutput::Single(frame) => Some(frame),
            ModelOutput::Multiple(frames) => frames.first(),
        }
    }

    pub fn into_prediction(self) -> Option<FrameArray> {
        match self {
            ModelOutput::Single(frame) => Some(frame),
            ModelOutput::Multiple(frames) => frames.into_iter().next(),
        }
    }
}

/// A super-resolution model
pub trait Model {
    fn forward(&self, window: &WindowStack) -> ModelOutput;
}
