//! Frame file names
//!
//! Frame files carry the video length and a zero-padded frame index as the third- and
//! second-to-last `_`-separated fields, e.g. `Youku_00000_l_100_07_.npy` is frame 7 of a
//! 100-frame video. Sibling frames are addressed by rewriting the index field at its original
//! width.

use crate::error::DatasetError;
use std::path::{Path, PathBuf};

/// Marker identifying low-resolution directories and files.
pub const LOW_RES_MARKER: &str = "_l";

/// Replacement marker for the matching ground-truth directories and files.
pub const GROUND_TRUTH_MARKER: &str = "_h_GT";

/// A parsed frame file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameName {
    fields: Vec<String>,
    video_length: i64,
    frame_index: i64,
    index_width: usize,
}

impl FrameName {
    pub fn parse(file_name: &str) -> Result<Self, DatasetError> {
        let fields: Vec<String> = file_name.split('_').map(str::to_string).collect();
        if fields.len() < 3 {
            return Err(invalid(
                file_name,
                "expected at least three '_'-separated fields",
            ));
        }
        let length_field = &fields[fields.len() - 3];
        let index_field = &fields[fields.len() - 2];

        let video_length = parse_number(length_field)
            .ok_or_else(|| invalid(file_name, "video length field is not a number"))?;
        let frame_index = parse_number(index_field)
            .ok_or_else(|| invalid(file_name, "frame index field is not a number"))?;
        if video_length < 1 {
            return Err(invalid(file_name, "video length must be at least 1"));
        }

        let index_width = index_field.len();
        Ok(Self {
            fields,
            video_length,
            frame_index,
            index_width,
        })
    }

    /// Parse the file-name component of a path.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| invalid(&path.to_string_lossy(), "path has no UTF-8 file name"))?;
        Self::parse(name)
    }

    pub fn video_length(&self) -> i64 {
        self.video_length
    }

    pub fn max_index(&self) -> i64 {
        self.video_length - 1
    }

    pub fn frame_index(&self) -> i64 {
        self.frame_index
    }

    pub fn index_width(&self) -> usize {
        self.index_width
    }

    /// Render the name of frame `index` of the same video.
    pub fn with_index(&self, index: i64) -> String {
        let mut fields = self.fields.clone();
        let slot = fields.len() - 2;
        fields[slot] = format!("{:0width$}", index, width = self.index_width);
        fields.join("_")
    }

    /// Names of every frame in a resolved window, in window order.
    pub fn window_names(&self, indices: &[i64]) -> Vec<String> {
        indices.iter().map(|&i| self.with_index(i)).collect()
    }

    pub fn as_string(&self) -> String {
        self.fields.join("_")
    }
}

impl std::fmt::Display for FrameName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

fn parse_number(field: &str) -> Option<i64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn invalid(name: &str, reason: &str) -> DatasetError {
    DatasetError::FileName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Whether a directory or file name carries the low-resolution marker.
pub fn is_low_resolution(name: &str) -> bool {
    name.contains(LOW_RES_MARKER)
}

/// Ground-truth counterpart of a low-resolution name.
pub fn ground_truth_name(name: &str) -> String {
    name.replace(LOW_RES_MARKER, GROUND_TRUTH_MARKER)
}

/// Ground-truth counterpart of a low-resolution frame path.
///
/// Rewrites the frame file name and its video directory; the dataset root is left alone.
pub fn ground_truth_path(path: &Path) -> PathBuf {
    let file = path
        .file_name()
        .map(|n| ground_truth_name(&n.to_string_lossy()));
    let video_dir = path.parent();

    match (video_dir, file) {
        (Some(dir), Some(file)) => {
            let dir = match (dir.parent(), dir.file_name()) {
                (Some(root), Some(name)) => root.join(ground_truth_name(&name.to_string_lossy())),
                _ => dir.to_path_buf(),
            };
            dir.join(file)
        }
        (None, Some(file)) => PathBuf::from(file),
        _ => path.to_path_buf(),
    }
}
