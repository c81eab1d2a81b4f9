//! Classifies the navigation decision implied by each recorded frame and scores it.
//!
//! Consumes the motion observations and circle detections produced by the vision stage,
//! rebuilds a synthetic trajectory for the report, and aggregates run statistics.

// Dependencies
use log::{debug, info};

use super::report::{ReportSink, write_report};
use super::{
    AnalysisConfig, AnalysisResult, DecisionCategory, DecisionRecord, FrameOrientation,
    count_in_order,
};
use crate::core::{Orientation, PerceptionResult, Position};

// Quality scores per category: (condition met, condition not met)
const APPROACH_QUALITY: (f64, f64) = (0.9, 0.6);
const STOP_QUALITY: (f64, f64) = (0.8, 0.4);
const MOVE_QUALITY: (f64, f64) = (0.8, 0.5);
const NAVIGATE_QUALITY: (f64, f64) = (0.8, 0.6);
const CRUISE_QUALITY: (f64, f64) = (0.7, 0.5);

// Frame-local inputs to the classifier
struct FrameContext {
    index: usize,
    velocity: f64,
    prev_velocity: f64,
    direction_change: f64,
    target_seen: bool,
    other_circles: usize,
}

/// Scores decisions frame by frame.
///
/// Every analysed frame's category is appended to `decision_history`, which lives as long as
/// the analyzer and is only emptied by [`DecisionAnalyzer::clear_history`].
#[derive(Debug, Clone, Default)]
pub struct DecisionAnalyzer {
    config: AnalysisConfig,
    decision_history: Vec<DecisionCategory>,
}

impl DecisionAnalyzer {
    /// Creates an analyzer with default thresholds and an empty history
    pub fn new() -> Self {
        DecisionAnalyzer::with_config(AnalysisConfig::default())
    }

    /// Creates an analyzer with the given thresholds
    pub fn with_config(config: AnalysisConfig) -> Self {
        DecisionAnalyzer {
            config,
            decision_history: Vec::new(),
        }
    }

    /// Thresholds in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Classifies every motion observation and aggregates the run.
    ///
    /// An empty observation stream yields an all-zero result and leaves the history untouched.
    pub fn analyze_decision_patterns(&mut self, data: &PerceptionResult) -> AnalysisResult {
        let movement = &data.movement_data;
        if movement.is_empty() {
            info!("No motion observations; nothing to analyse");
            return AnalysisResult::default();
        }

        let mut decisions = Vec::with_capacity(movement.len());
        let mut orientation_data = Vec::with_capacity(movement.len());

        for (i, obs) in movement.iter().enumerate() {
            let velocity = obs.velocity;
            let direction = obs.direction;

            orientation_data.push(FrameOrientation {
                frame: i,
                position: Position::new(
                    i as f64 * 2.5 + velocity * 5.0,
                    velocity * direction.to_radians().sin() * 3.0,
                    0.0,
                ),
                orientation: Orientation::from_yaw(direction),
            });

            let (target_seen, other_circles) = match data.detection_for_frame(i) {
                Some(d) => (d.has_target(), d.circles.len()),
                None => (false, 0),
            };

            let (prev_velocity, direction_change) = match i.checked_sub(1).map(|p| &movement[p]) {
                Some(prev) => (prev.velocity, (direction - prev.direction).abs()),
                None => (0.0, 0.0),
            };

            let ctx = FrameContext {
                index: i,
                velocity,
                prev_velocity,
                direction_change,
                target_seen,
                other_circles,
            };
            let (category, quality) = self.classify(&ctx);
            debug!("Frame {}: {} (quality {:.1})", i, category, quality);
            decisions.push(DecisionRecord {
                frame: i,
                category,
                quality,
            });
        }

        let total_decisions = decisions.len();
        let good_decisions_count = decisions
            .iter()
            .filter(|d| d.quality > self.config.good_decision_threshold)
            .count();
        let decision_accuracy = if total_decisions > 0 {
            good_decisions_count as f64 / total_decisions as f64
        } else {
            0.0
        };

        let average_velocity =
            movement.iter().map(|o| o.velocity).sum::<f64>() / movement.len() as f64;

        let target_records = data
            .circle_detection_data
            .iter()
            .filter(|d| d.has_target())
            .count();
        let movement_efficiency = target_records as f64 / movement.len() as f64;

        let total_circles_detected = data
            .circle_detection_data
            .iter()
            .map(|d| d.circles_count)
            .sum();

        let average_direction_change = if movement.len() > 1 {
            let changes: f64 = movement
                .windows(2)
                .map(|w| (w[1].direction - w[0].direction).abs())
                .sum();
            changes / (movement.len() - 1) as f64
        } else {
            0.0
        };

        self.decision_history
            .extend(decisions.iter().map(|d| d.category));

        info!(
            "Analysed {} frames: {} good decisions ({:.1}%), avg velocity {:.2}",
            total_decisions,
            good_decisions_count,
            decision_accuracy * 100.0,
            average_velocity
        );

        AnalysisResult {
            decision_accuracy,
            total_decisions,
            average_velocity,
            movement_efficiency,
            decisions,
            orientation_data,
            total_circles_detected,
            average_direction_change,
            good_decisions_count,
        }
    }

    // First matching rule wins: approach, stop, move, navigate, cruise
    fn classify(&self, ctx: &FrameContext) -> (DecisionCategory, f64) {
        let pick = |ok: bool, (good, bad): (f64, f64)| if ok { good } else { bad };
        let v = ctx.velocity;

        if ctx.target_seen {
            let accelerating = if ctx.index > 0 {
                v > ctx.prev_velocity
            } else {
                v > 1.0
            };
            (DecisionCategory::ApproachTarget, pick(accelerating, APPROACH_QUALITY))
        } else if v < self.config.stop_velocity {
            // stopping next to an obstacle is sound
            (DecisionCategory::Stop, pick(ctx.other_circles > 0, STOP_QUALITY))
        } else if v > self.config.move_velocity {
            (DecisionCategory::Move, pick(ctx.direction_change < 15.0, MOVE_QUALITY))
        } else if ctx.other_circles > 0 {
            let steady = v > 0.5 && v < 2.5 && ctx.direction_change < 30.0;
            (DecisionCategory::Navigate, pick(steady, NAVIGATE_QUALITY))
        } else {
            let steady = v > 1.0 && v < 2.0 && ctx.direction_change < 20.0;
            (DecisionCategory::Cruise, pick(steady, CRUISE_QUALITY))
        }
    }

    /// Renders the report for `result` and writes it to `sink` in one go.
    pub fn generate_decision_report<S: ReportSink + ?Sized>(
        &self,
        result: &AnalysisResult,
        sink: &mut S,
    ) -> crate::Result<()> {
        write_report(result, &self.config, sink)
    }

    /// Categories of every frame analysed since creation or the last clear
    pub fn decision_history(&self) -> &[DecisionCategory] {
        &self.decision_history
    }

    /// History totals per category, first-seen order
    pub fn category_counts(&self) -> Vec<(DecisionCategory, usize)> {
        count_in_order(self.decision_history.iter().copied())
    }

    /// Empties the accumulated history.
    pub fn clear_history(&mut self) {
        self.decision_history.clear();
    }
}
