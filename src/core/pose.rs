//! Value types for the vehicle pose: 3D position and roll/pitch/yaw orientation in degrees.
//!
//! Shared by the planner (current/target pose) and the decision analyzer (synthetic trajectory).

// Dependencies
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Position: x/y planar, z vertical, units consistent with the velocity inputs
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Forward axis
    pub x: f64,
    /// Sideways axis
    pub y: f64,
    /// Vertical axis
    pub z: f64,
}

/// Orientation in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Rotation about X
    pub roll: f64,
    /// Rotation about Y
    pub pitch: f64,
    /// Rotation about Z, the heading
    pub yaw: f64,
}

impl Position {
    /// Creates a position from its three coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// Returns the position as a column vector
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Returns the position as an `(x, y, z)` tuple
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Position {
    fn from(v: Vector3<f64>) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl Orientation {
    /// Creates an orientation from roll, pitch and yaw in degrees
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Orientation { roll, pitch, yaw }
    }

    /// Orientation with only a heading; roll and pitch level
    pub fn from_yaw(yaw: f64) -> Self {
        Orientation::new(0.0, 0.0, yaw)
    }

    /// Returns `(roll, pitch, yaw)` as a column vector
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.roll, self.pitch, self.yaw)
    }

    /// Returns the orientation as a `(roll, pitch, yaw)` tuple
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.roll, self.pitch, self.yaw)
    }
}

/// Wraps an angle difference in degrees into `(-180, 180]`, giving the shortest signed rotation.
///
/// Values already in range are returned unchanged, so the function is idempotent.
/// Non-finite input yields `0.0`.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    if angle > -180.0 && angle <= 180.0 {
        return angle;
    }

    // rem_euclid lands in [0, 360]; the upper bound is reachable through rounding
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// Bearing in radians from `from` to `to` in the XY plane.
///
/// Coincident points have no bearing; `0.0` (facing +X) is returned for them.
pub fn planar_bearing(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    dy.atan2(dx)
}
