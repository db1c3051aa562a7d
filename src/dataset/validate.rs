//! Dataset validation: every window a plan could request must be loadable.

use crate::dataset::VideoDataset;
use crate::naming::FrameName;
use crate::window::reference_range;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    EmptyVideo,
    UnparsableName,
    LengthMismatch,
    UnplannableReference,
    MissingFrame,
    MissingGroundTruth,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ValidationIssue {
    pub video: String,
    pub kind: IssueKind,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub videos: usize,
    pub frames: usize,
    pub windows_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

impl VideoDataset {
    /// Check every video without stopping at the first problem.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport {
            videos: self.videos().len(),
            ..ValidationReport::default()
        };
        let window_size = self.resolver().window_size();

        for video in self.videos() {
            let video_name = video.name();
            let mut issue = |kind: IssueKind, detail: String| {
                report.issues.push(ValidationIssue {
                    video: video_name.clone(),
                    kind,
                    detail,
                })
            };

            report.frames += video.frames.len();
            if video.frames.is_empty() {
                issue(IssueKind::EmptyVideo, video.dir.display().to_string());
                continue;
            }

            let mut lengths = BTreeSet::new();
            for frame in &video.frames {
                match FrameName::from_path(frame) {
                    Ok(name) => {
                        lengths.insert(name.video_length());
                    }
                    Err(e) => issue(IssueKind::UnparsableName, e.to_string()),
                }
            }
            for length in &lengths {
                if *length != video.frames.len() as i64 {
                    issue(
                        IssueKind::LengthMismatch,
                        format!(
                            "name encodes {} frames, directory holds {}",
                            length,
                            video.frames.len()
                        ),
                    );
                }
            }

            let candidates = match reference_range(video.frames.len() as i64, window_size) {
                Ok(range) => range,
                Err(e) => {
                    issue(IssueKind::UnplannableReference, e.to_string());
                    continue;
                }
            };

            let mut missing_frames: BTreeSet<PathBuf> = BTreeSet::new();
            let mut missing_truth: BTreeSet<PathBuf> = BTreeSet::new();
            for position in candidates {
                let reference = video.frames[position as usize].clone();
                if FrameName::from_path(&reference).is_err() {
                    // Already reported as unparsable.
                    continue;
                }
                let plan = match self.plan_for_reference(video, reference) {
                    Ok(plan) => plan,
                    Err(e) => {
                        issue(IssueKind::UnplannableReference, e.to_string());
                        continue;
                    }
                };
                report.windows_checked += 1;
                missing_frames.extend(plan.window.into_iter().filter(|p| !p.exists()));
                if !plan.ground_truth.exists() {
                    missing_truth.insert(plan.ground_truth);
                }
            }

            for path in missing_frames {
                issue(IssueKind::MissingFrame, path.display().to_string());
            }
            for path in missing_truth {
                issue(IssueKind::MissingGroundTruth, path.display().to_string());
            }
        }

        if report.is_ok() {
            info!(
                videos = report.videos,
                windows = report.windows_checked,
                "Dataset validation passed"
            );
        } else {
            warn!(
                videos = report.videos,
                issues = report.issues.len(),
                "Dataset validation found issues"
            );
        }
        report
    }
}
