//! vsr-window: temporal windows for video super-resolution datasets
//!
//! Resolves the fixed-size window of neighbouring frames around a reference frame, padding
//! past either end of the video with one of four policies, and plans training samples over a
//! directory of per-video frame files.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod naming;
pub mod window;
