//! Renders an [`AnalysisResult`] as the plain-text run report and writes it to a destination.

// The line layout and number formatting are consumed by existing tooling; keep them stable.

// Dependencies
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{AnalysisConfig, AnalysisResult, FrameOrientation};

/// Destination for a rendered report. Receives the whole text in a single call.
pub trait ReportSink {
    /// Writes the complete report text
    fn write_report(&mut self, text: &str) -> std::io::Result<()>;
}

/// Writes the report to a file, replacing any previous content
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Sink writing to `path`; nothing is touched until the report is written
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileSink {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Destination file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    fn write_report(&mut self, text: &str) -> std::io::Result<()> {
        let mut file = File::create(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    }
}

/// Qualitative heading stability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    /// Mean yaw change below the high-stability threshold
    High,
    /// Mean yaw change below the medium-stability threshold
    Medium,
    /// Anything else
    Low,
}

impl std::fmt::Display for Stability {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            Stability::High => "High",
            Stability::Medium => "Medium",
            Stability::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Yaw statistics over the per-frame trajectory records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationStats {
    /// Mean yaw, degrees
    pub average_yaw: f64,
    /// Smallest yaw, degrees
    pub min_yaw: f64,
    /// Largest yaw, degrees
    pub max_yaw: f64,
    /// Mean absolute yaw change between consecutive frames, 0 for a single frame
    pub average_yaw_change: f64,
    /// Stability class of `average_yaw_change`
    pub stability: Stability,
}

impl OrientationStats {
    /// Returns `None` when there are no records.
    pub fn from_records(records: &[FrameOrientation], config: &AnalysisConfig) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let yaws: Vec<f64> = records.iter().map(|r| r.orientation.yaw).collect();
        let average_yaw = yaws.iter().sum::<f64>() / yaws.len() as f64;
        let min_yaw = yaws.iter().copied().fold(f64::INFINITY, f64::min);
        let max_yaw = yaws.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let average_yaw_change = if yaws.len() > 1 {
            let total: f64 = yaws.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
            total / (yaws.len() - 1) as f64
        } else {
            0.0
        };

        let stability = if average_yaw_change < config.high_stability_change {
            Stability::High
        } else if average_yaw_change < config.medium_stability_change {
            Stability::Medium
        } else {
            Stability::Low
        };

        Some(OrientationStats {
            average_yaw,
            min_yaw,
            max_yaw,
            average_yaw_change,
            stability,
        })
    }
}

/// Renders the report text. Lines are joined with `\n`, without a trailing newline.
pub fn render_report(result: &AnalysisResult, config: &AnalysisConfig) -> String {
    let mut lines: Vec<String> = vec![
        "ROV VIDEO ANALYSIS".to_string(),
        "=".repeat(55),
        format!("Total Decisions: {}", result.total_decisions),
        format!("Decision Quality: {:.1}%", result.decision_accuracy * 100.0),
        format!("Average Speed: {:.2} units/frame", result.average_velocity),
        format!(
            "Yellow Target Efficiency: {:.1}%",
            result.movement_efficiency * 100.0
        ),
        format!("Circles Detected: {}", result.total_circles_detected),
        format!(
            "Avg Direction Change: {:.1}°/frame",
            result.average_direction_change
        ),
    ];

    if !result.decisions.is_empty() {
        let total = result.decisions.len() as f64;
        lines.push(String::new());
        lines.push("DECISION BREAKDOWN:".to_string());
        lines.push("-".repeat(20));
        for (category, count) in result.category_breakdown() {
            let percentage = count as f64 / total * 100.0;
            lines.push(format!("  {}: {} ({:.1}%)", category, count, percentage));
        }
    }

    if let Some(stats) = OrientationStats::from_records(&result.orientation_data, config) {
        lines.push(String::new());
        lines.push("ORIENTATION ANALYSIS :".to_string());
        lines.push("-".repeat(45));
        lines.push(format!("  Average Yaw: {:.1}°", stats.average_yaw));
        lines.push(format!(
            "  Yaw Range: {:.1}° to {:.1}°",
            stats.min_yaw, stats.max_yaw
        ));
        lines.push(format!(
            "  Avg Yaw Change: {:.1}°/frame",
            stats.average_yaw_change
        ));
        lines.push(format!("  Orientation Stability: {}", stats.stability));
    }

    lines.join("\n")
}

/// Renders `result` and hands the text to `sink` once. Write failures are returned as-is.
pub fn write_report<S: ReportSink + ?Sized>(
    result: &AnalysisResult,
    config: &AnalysisConfig,
    sink: &mut S,
) -> crate::Result<()> {
    let text = render_report(result, config);
    sink.write_report(&text)?;
    info!("Report written ({} bytes)", text.len());
    Ok(())
}
