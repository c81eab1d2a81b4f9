// src/navigation/controller.rs
// Turns planner output into motor commands and keeps a log of every command it issued.
// Thin stateful layer over PathPlanner.

use crate::core::{Orientation, Position};
use log::{debug, info};
use serde::Serialize;

use super::{MotorCommand, NavigationConfig, PathPlanner, PathSummary};

/// Efficiency figures for the commands issued so far
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyMetrics {
    /// Constant placeholder, not derived from the command log
    pub efficiency: f64,
}

/// Plan summary plus command statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementSummary {
    /// Summary of the planner's current plan
    pub path_summary: PathSummary,
    /// Commands recorded by `compute_movement_vector`
    pub total_commands: usize,
    /// Efficiency of the recorded commands
    pub efficiency_metrics: EfficiencyMetrics,
}

/// Owns one planner and an append-only history of generated commands.
#[derive(Debug, Clone, Default)]
pub struct MovementController {
    path_planner: PathPlanner,
    movement_history: Vec<MotorCommand>,
}

impl MovementController {
    /// Creates a controller with default calibration.
    pub fn new() -> Self {
        MovementController::with_config(NavigationConfig::default())
    }

    /// Creates a controller whose planner uses `config`.
    pub fn with_config(config: NavigationConfig) -> Self {
        MovementController {
            path_planner: PathPlanner::with_config(config),
            movement_history: Vec::new(),
        }
    }

    /// Forwards the current pose to the planner.
    pub fn set_current_state(&mut self, position: Position, orientation: Orientation) {
        self.path_planner.set_current_state(position, orientation);
    }

    /// Forwards the target pose to the planner.
    pub fn set_target_state(&mut self, position: Position, orientation: Orientation) {
        self.path_planner.set_target_state(position, orientation);
    }

    /// Computes the command for the current plan and records it.
    pub fn compute_movement_vector(&mut self) -> MotorCommand {
        let movements = self.path_planner.compute_movement_requirement();
        let command = self.path_planner.generate_motor_command(&movements);
        self.movement_history.push(command);

        info!(
            "Command #{}: forward={:.3}, sideways={:.3}, vertical={:.3}, yaw={:.3}",
            self.movement_history.len(),
            command.forward_thruster,
            command.sideways_thruster,
            command.vertical_thruster,
            command.yaw_motor
        );
        for (name, value) in MotorCommand::CHANNEL_NAMES.iter().zip(command.channels()) {
            debug!("  {}: {:.3}", name, value);
        }
        command
    }

    /// Plans a stand-off approach to `center`, `radius` acting as the approach distance.
    /// The resulting command is returned but not added to the history.
    pub fn plan_circle_approach_strategy(&mut self, center: (f64, f64), radius: f64) -> MotorCommand {
        let movements = self.path_planner.plan_circle_approach(center, Some(radius));
        self.path_planner.generate_motor_command(&movements)
    }

    /// Plan summary, number of recorded commands and the efficiency placeholder.
    pub fn get_movement_summary(&self) -> MovementSummary {
        let total_commands = self.movement_history.len();
        // TODO: derive efficiency from the command log instead of a fixed value
        let efficiency = if total_commands > 0 {
            self.path_planner.config().placeholder_efficiency
        } else {
            0.0
        };

        MovementSummary {
            path_summary: self.path_planner.get_path_summary(),
            total_commands,
            efficiency_metrics: EfficiencyMetrics { efficiency },
        }
    }

    /// Every command recorded so far, oldest first.
    pub fn movement_history(&self) -> &[MotorCommand] {
        &self.movement_history
    }

    /// The planner holding the current and target pose.
    pub fn planner(&self) -> &PathPlanner {
        &self.path_planner
    }
}
