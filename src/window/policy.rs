//! Padding policies for window offsets that fall outside the video.

use crate::error::WindowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a window offset outside `[0, max_index]` is mapped back onto a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PaddingPolicy {
    /// Clamp to the first/last frame.
    Replicate,
    /// Mirror across the first/last frame.
    #[default]
    Reflection,
    /// Mirror around the opposite window edge, pulling in frames not already in the window.
    NewInfo,
    /// Wrap by the window size.
    Circle,
}

impl PaddingPolicy {
    pub const ALL: [PaddingPolicy; 4] = [
        PaddingPolicy::Replicate,
        PaddingPolicy::Reflection,
        PaddingPolicy::NewInfo,
        PaddingPolicy::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaddingPolicy::Replicate => "replicate",
            PaddingPolicy::Reflection => "reflection",
            PaddingPolicy::NewInfo => "new_info",
            PaddingPolicy::Circle => "circle",
        }
    }
}

impl fmt::Display for PaddingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaddingPolicy {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replicate" => Ok(PaddingPolicy::Replicate),
            "reflection" => Ok(PaddingPolicy::Reflection),
            "new_info" => Ok(PaddingPolicy::NewInfo),
            "circle" => Ok(PaddingPolicy::Circle),
            other => Err(WindowError::Configuration(format!(
                "Unknown padding policy '{}' (must be 'replicate', 'reflection', 'new_info' or 'circle')",
                other
            ))),
        }
    }
}

impl TryFrom<String> for PaddingPolicy {
    type Error = WindowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
