// src/navigation/planner.rs
// Plans single-step ROV movements: pose deltas, circle approach and orbit targets,
// and the feed-forward mapping from deltas to thruster powers.

// Imports dependencies and shared types.
// - Position, Orientation: pose value types from core.
// - nalgebra: vector scaling for the thruster mapping.
use crate::core::pose::{normalize_angle, planar_bearing};
use crate::core::{Orientation, Position};
use log::debug;
use nalgebra::Vector6;
use serde::Serialize;

use super::{MotorCommand, MovementRequirement, NavigationConfig};

/// Summary of the current plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSummary {
    /// Current position as `(x, y, z)`
    pub current_position: (f64, f64, f64),
    /// Target position as `(x, y, z)`
    pub target_position: (f64, f64, f64),
    /// Straight-line distance between current and target position
    pub total_distance: f64,
    /// Deltas from the current to the target pose
    pub required_movements: MovementRequirement,
}

/// Holds the current and target pose of the vehicle.
/// Pose state only changes through the setters and the two `plan_*` methods.
#[derive(Debug, Clone)]
pub struct PathPlanner {
    config: NavigationConfig,
    current_position: Position,
    current_orientation: Orientation,
    target_position: Position,
    target_orientation: Orientation,
}

impl Default for PathPlanner {
    fn default() -> Self {
        PathPlanner::new()
    }
}

impl PathPlanner {
    /// Creates a planner at the origin with default calibration.
    pub fn new() -> Self {
        PathPlanner::with_config(NavigationConfig::default())
    }

    /// Creates a planner at the origin with the given calibration.
    pub fn with_config(config: NavigationConfig) -> Self {
        PathPlanner {
            config,
            current_position: Position::default(),
            current_orientation: Orientation::default(),
            target_position: Position::default(),
            target_orientation: Orientation::default(),
        }
    }

    /// Calibration in use.
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Updates the current pose.
    pub fn set_current_state(&mut self, position: Position, orientation: Orientation) {
        self.current_position = position;
        self.current_orientation = orientation;
    }

    /// Sets the pose to reach.
    pub fn set_target_state(&mut self, position: Position, orientation: Orientation) {
        self.target_position = position;
        self.target_orientation = orientation;
    }

    /// Current position and orientation.
    pub fn current_state(&self) -> (Position, Orientation) {
        (self.current_position, self.current_orientation)
    }

    /// Pose the planner is steering towards.
    pub fn target_state(&self) -> (Position, Orientation) {
        (self.target_position, self.target_orientation)
    }

    /// Computes `target - current` for every degree of freedom.
    /// Angular deltas are wrapped to the shortest signed rotation.
    pub fn compute_movement_requirement(&self) -> MovementRequirement {
        let linear = self.target_position.to_vector() - self.current_position.to_vector();
        let angular = (self.target_orientation.to_vector() - self.current_orientation.to_vector())
            .map(normalize_angle);

        MovementRequirement {
            forward_movement: linear.x,
            sideways_movement: linear.y,
            vertical_movement: linear.z,
            roll_adjustment: angular.x,
            pitch_adjustment: angular.y,
            yaw_adjustment: angular.z,
        }
    }

    /// Targets a point `approach_distance` short of `center` along the bearing from the
    /// current position, facing the center. Depth is kept; roll and pitch are levelled.
    /// `None` uses the configured approach distance.
    ///
    /// If the vehicle sits exactly on the center the bearing is taken as 0 degrees.
    pub fn plan_circle_approach(
        &mut self,
        center: (f64, f64),
        approach_distance: Option<f64>,
    ) -> MovementRequirement {
        let distance = approach_distance.unwrap_or(self.config.approach_distance);
        let bearing = planar_bearing((self.current_position.x, self.current_position.y), center);

        let target = Position::new(
            center.0 - distance * bearing.cos(),
            center.1 - distance * bearing.sin(),
            self.current_position.z,
        );
        self.set_target_state(target, Orientation::from_yaw(bearing.to_degrees()));
        debug!(
            "Circle approach target: x={:.2}, y={:.2}, yaw={:.1}",
            target.x,
            target.y,
            bearing.to_degrees()
        );

        self.compute_movement_requirement()
    }

    /// Advances one orbit step around `center` and targets the next point on the circle,
    /// heading along the tangent in the direction of travel (counter-clockwise).
    /// `None` uses the configured orbit radius.
    ///
    /// If the vehicle sits exactly on the center its angular position is taken as 0 degrees.
    pub fn plan_circular_path(
        &mut self,
        center: (f64, f64),
        radius: Option<f64>,
    ) -> MovementRequirement {
        let radius = radius.unwrap_or(self.config.orbit_radius);
        let current_angle =
            planar_bearing(center, (self.current_position.x, self.current_position.y));
        let next_angle = current_angle + self.config.orbit_step_deg.to_radians();

        let target = Position::new(
            center.0 + radius * next_angle.cos(),
            center.1 + radius * next_angle.sin(),
            self.current_position.z,
        );
        let heading = normalize_angle((next_angle + std::f64::consts::FRAC_PI_2).to_degrees());
        self.set_target_state(target, Orientation::from_yaw(heading));
        debug!(
            "Orbit target: x={:.2}, y={:.2}, yaw={:.1}",
            target.x, target.y, heading
        );

        self.compute_movement_requirement()
    }

    /// Scales linear deltas by `1 / linear_full_power` and angular deltas by
    /// `1 / angular_full_power`, clamping every channel to `[-1.0, 1.0]`.
    pub fn generate_motor_command(&self, req: &MovementRequirement) -> MotorCommand {
        let linear = req.linear() / self.config.linear_full_power;
        let angular = req.angular() / self.config.angular_full_power;

        MotorCommand::from_vector(Vector6::new(
            linear.x, linear.y, linear.z, angular.x, angular.y, angular.z,
        ))
    }

    /// Current and target position plus the deltas between them.
    pub fn get_path_summary(&self) -> PathSummary {
        let movements = self.compute_movement_requirement();
        PathSummary {
            current_position: self.current_position.as_tuple(),
            target_position: self.target_position.as_tuple(),
            total_distance: movements.total_distance(),
            required_movements: movements,
        }
    }
}

// Weaknesses:
// - Open loop: one step per call, no feedback from the achieved pose.
// - Orbit direction is fixed to counter-clockwise.
// - Roll and pitch are carried but always levelled by the circle planners.

// Current Functionality:
// - Computes normalized pose deltas between current and target state.
// - Plans stand-off approach and orbit targets around a detected circle.
// - Maps deltas to clamped thruster powers with fixed calibration divisors.
