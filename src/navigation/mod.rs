//! Navigation system for the ROV
//!
//! This module computes single-step movement requirements between the current and the target
//! pose, plans circle-approach and orbit targets, and maps requirements to thruster powers.

mod controller;
mod planner;

pub use controller::{EfficiencyMetrics, MovementController, MovementSummary};
pub use planner::{PathPlanner, PathSummary};

use nalgebra::{Vector3, Vector6};
use serde::{Deserialize, Serialize};

/// Planner and thruster calibration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Linear delta producing full thruster power
    pub linear_full_power: f64,
    /// Angular delta (degrees) producing full motor power
    pub angular_full_power: f64,
    /// Angle advanced per orbit step, degrees
    pub orbit_step_deg: f64,
    /// Stand-off distance used when approaching a circle
    pub approach_distance: f64,
    /// Orbit radius used when none is given
    pub orbit_radius: f64,
    /// Efficiency reported once any command was issued
    pub placeholder_efficiency: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            linear_full_power: 100.0,
            angular_full_power: 45.0,
            orbit_step_deg: 5.0,
            approach_distance: 50.0,
            orbit_radius: 100.0,
            placeholder_efficiency: 0.8,
        }
    }
}

/// Deltas needed to go from the current to the target pose.
///
/// Angular components are already normalized into `(-180, 180]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementRequirement {
    /// X delta
    pub forward_movement: f64,
    /// Y delta
    pub sideways_movement: f64,
    /// Z delta
    pub vertical_movement: f64,
    /// Roll delta, degrees
    pub roll_adjustment: f64,
    /// Pitch delta, degrees
    pub pitch_adjustment: f64,
    /// Yaw delta, degrees
    pub yaw_adjustment: f64,
}

impl MovementRequirement {
    /// The three linear deltas
    pub fn linear(&self) -> Vector3<f64> {
        Vector3::new(self.forward_movement, self.sideways_movement, self.vertical_movement)
    }

    /// The three angular deltas
    pub fn angular(&self) -> Vector3<f64> {
        Vector3::new(self.roll_adjustment, self.pitch_adjustment, self.yaw_adjustment)
    }

    /// All six deltas, linear first
    pub fn as_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.forward_movement,
            self.sideways_movement,
            self.vertical_movement,
            self.roll_adjustment,
            self.pitch_adjustment,
            self.yaw_adjustment,
        )
    }

    /// Euclidean length of the linear part; rotation is not counted
    pub fn total_distance(&self) -> f64 {
        self.linear().norm()
    }

    /// True when no degree of freedom needs to move
    pub fn is_zero(&self) -> bool {
        self.as_vector().iter().all(|v| *v == 0.0)
    }
}

/// Thruster powers, one per degree of freedom, each in `[-1.0, 1.0]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorCommand {
    /// Surge thruster power
    pub forward_thruster: f64,
    /// Sway thruster power
    pub sideways_thruster: f64,
    /// Heave thruster power
    pub vertical_thruster: f64,
    /// Roll motor power
    pub roll_motor: f64,
    /// Pitch motor power
    pub pitch_motor: f64,
    /// Yaw motor power
    pub yaw_motor: f64,
}

impl MotorCommand {
    /// Builds a command from six channel values in thruster order, clamping each to `[-1, 1]`
    pub fn from_vector(channels: Vector6<f64>) -> Self {
        let c = channels.map(|v| v.clamp(-1.0, 1.0));
        MotorCommand {
            forward_thruster: c[0],
            sideways_thruster: c[1],
            vertical_thruster: c[2],
            roll_motor: c[3],
            pitch_motor: c[4],
            yaw_motor: c[5],
        }
    }

    /// Channel values in thruster order
    pub fn channels(&self) -> [f64; 6] {
        [
            self.forward_thruster,
            self.sideways_thruster,
            self.vertical_thruster,
            self.roll_motor,
            self.pitch_motor,
            self.yaw_motor,
        ]
    }

    /// Names of the six channels, in the order of [`MotorCommand::channels`]
    pub const CHANNEL_NAMES: [&'static str; 6] = [
        "forward_thruster",
        "sideways_thruster",
        "vertical_thruster",
        "roll_motor",
        "pitch_motor",
        "yaw_motor",
    ];
}
