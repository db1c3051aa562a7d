//! CLI presentation: text and JSON formatters for command results.

use crate::dataset::{SamplePlan, ValidationReport, Video};
use crate::error::ApiError;
use crate::window::ResolvedWindow;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn join_indices(indices: &[i64]) -> String {
    let parts: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn policy_line(window: &ResolvedWindow) -> String {
    if window.fallback {
        format!(
            "{} ({} requested, video shorter than window)",
            window.effective,
            window.requested.yellow()
        )
    } else {
        window.effective.to_string()
    }
}

pub fn format_resolve(window: &ResolvedWindow, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(window)?);
    }
    Ok(format!(
        "Window: {}\n  Frames: {}\n  Reference: {}\n  Padding: {}",
        join_indices(&window.indices),
        window.max_index + 1,
        window.ref_index,
        policy_line(window)
    ))
}

pub fn format_names(
    window: &ResolvedWindow,
    names: &[String],
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        let out = json!({
            "indices": window.indices,
            "effective": window.effective,
            "fallback": window.fallback,
            "names": names,
        });
        return Ok(serde_json::to_string_pretty(&out)?);
    }
    let mut lines = vec![format!(
        "Window {} ({})",
        join_indices(&window.indices),
        policy_line(window)
    )];
    for (offset, name) in names.iter().enumerate() {
        let marker = if offset == window.center() { "*" } else { " " };
        lines.push(format!("  {} {}", marker, name));
    }
    Ok(lines.join("\n"))
}

pub fn format_scan(data_dir: &Path, videos: &[Video], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        let entries: Vec<_> = videos
            .iter()
            .map(|v| json!({ "video": v.name(), "dir": v.dir, "frames": v.frame_count() }))
            .collect();
        let out = json!({ "data_dir": data_dir, "videos": entries });
        return Ok(serde_json::to_string_pretty(&out)?);
    }
    if videos.is_empty() {
        return Ok(format!("No videos found under {}", data_dir.display()));
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Video", "Frames"]);
    for video in videos {
        table.add_row(vec![video.name(), video.frame_count().to_string()]);
    }
    let total: usize = videos.iter().map(Video::frame_count).sum();
    Ok(format!(
        "{}\n{} videos, {} frames",
        table,
        videos.len(),
        total
    ))
}

pub fn format_plan(epoch: u64, plans: &[SamplePlan], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        let out = json!({ "epoch": epoch, "samples": plans });
        return Ok(serde_json::to_string_pretty(&out)?);
    }
    if plans.is_empty() {
        return Ok(format!("Epoch {}: no samples", epoch));
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Video", "Reference", "Window", "Padding", "Ground truth"]);
    for plan in plans {
        let padding = if plan.resolved.fallback {
            format!("{} (fallback)", plan.resolved.effective)
        } else {
            plan.resolved.effective.to_string()
        };
        table.add_row(vec![
            plan.video.clone(),
            plan.resolved.ref_index.to_string(),
            join_indices(&plan.resolved.indices),
            padding,
            file_name(&plan.ground_truth),
        ]);
    }
    Ok(format!("Epoch {}\n{}", epoch, table))
}

pub fn format_validation(report: &ValidationReport, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    let header = format!(
        "  Videos: {}\n  Frames: {}\n  Windows checked: {}",
        report.videos, report.frames, report.windows_checked
    );
    if report.is_ok() {
        return Ok(format!("Validation {}:\n{}", "passed".green(), header));
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Video", "Issue", "Detail"]);
    for issue in &report.issues {
        let kind = serde_json::to_value(issue.kind)?
            .as_str()
            .map(str::to_string)
            .unwrap_or_default();
        table.add_row(vec![issue.video.clone(), kind, issue.detail.clone()]);
    }
    Ok(format!(
        "Validation completed with {} ({}):\n{}\n{}",
        "issues".red(),
        report.issues.len(),
        header,
        table
    ))
}
