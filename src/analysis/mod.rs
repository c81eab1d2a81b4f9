//! Decision analysis for recorded ROV runs
//!
//! This module classifies the navigation decision implied by each perception frame, scores
//! its quality, aggregates run statistics and renders the text report.

mod decision;
mod report;

pub use decision::DecisionAnalyzer;
pub use report::{FileSink, OrientationStats, ReportSink, Stability, render_report, write_report};

use crate::core::{Orientation, Position};
use serde::{Deserialize, Serialize};

/// Decision scoring thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Quality strictly above this counts as a good decision
    pub good_decision_threshold: f64,
    /// Velocity below which a frame is a stop
    pub stop_velocity: f64,
    /// Velocity above which a frame is a move
    pub move_velocity: f64,
    /// Mean yaw change below this is high stability
    pub high_stability_change: f64,
    /// Mean yaw change below this is medium stability
    pub medium_stability_change: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            good_decision_threshold: 0.7,
            stop_velocity: 0.3,
            move_velocity: 3.0,
            high_stability_change: 5.0,
            medium_stability_change: 15.0,
        }
    }
}

/// Navigation intent classified for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionCategory {
    /// A target-colored circle is in view
    #[serde(rename = "approach_yellow")]
    ApproachTarget,
    /// Nearly stationary
    #[serde(rename = "stop")]
    Stop,
    /// Moving fast
    #[serde(rename = "move")]
    Move,
    /// Maneuvering around generic circles
    #[serde(rename = "navigate")]
    Navigate,
    /// None of the above
    #[serde(rename = "cruise")]
    Cruise,
}

impl DecisionCategory {
    /// Label used in reports and serialized output
    pub fn label(&self) -> &'static str {
        match self {
            DecisionCategory::ApproachTarget => "approach_yellow",
            DecisionCategory::Stop => "stop",
            DecisionCategory::Move => "move",
            DecisionCategory::Navigate => "navigate",
            DecisionCategory::Cruise => "cruise",
        }
    }
}

impl std::fmt::Display for DecisionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified decision and its quality score in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Index of the frame in the motion stream
    pub frame: usize,
    /// Classified intent
    pub category: DecisionCategory,
    /// Quality score
    pub quality: f64,
}

/// Synthetic trajectory sample reconstructed for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOrientation {
    /// Index of the frame in the motion stream
    pub frame: usize,
    /// Integrated position at this frame
    pub position: Position,
    /// Heading taken from the frame's motion direction
    pub orientation: Orientation,
}

/// Aggregate statistics for one analysed run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Good decisions over total decisions
    pub decision_accuracy: f64,
    /// Frames classified
    pub total_decisions: usize,
    /// Mean optical-flow velocity over all frames
    pub average_velocity: f64,
    /// Detection records with a target-colored circle over motion observations
    pub movement_efficiency: f64,
    /// One record per frame, in frame order
    pub decisions: Vec<DecisionRecord>,
    /// Synthetic trajectory, one sample per frame
    pub orientation_data: Vec<FrameOrientation>,
    /// Sum of the generic circle counts over every detection record
    pub total_circles_detected: u64,
    /// Mean absolute direction change between consecutive frames, 0 for a single frame
    pub average_direction_change: f64,
    /// Decisions whose quality exceeds the good-decision threshold
    pub good_decisions_count: usize,
}

impl AnalysisResult {
    /// Per-category counts in first-seen order
    pub fn category_breakdown(&self) -> Vec<(DecisionCategory, usize)> {
        count_in_order(self.decisions.iter().map(|d| d.category))
    }
}

pub(crate) fn count_in_order<I>(categories: I) -> Vec<(DecisionCategory, usize)>
where
    I: IntoIterator<Item = DecisionCategory>,
{
    let mut counts: Vec<(DecisionCategory, usize)> = Vec::new();
    for category in categories {
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => counts.push((category, 1)),
        }
    }
    counts
}
