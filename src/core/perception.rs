//! Data handed over by the vision stage: per-frame motion observations (optical-flow velocity
//! and direction) and per-frame circle detections, generic and target-colored. The vision
//! stage writes these as JSON; this module only models and loads them.
//!
//! Per-frame fields that are missing, `null` or of the wrong type read as their default
//! (zero or empty), so one bad frame never rejects a whole recording.

// Dependencies
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// Parses any JSON value and falls back to the default if it does not fit `T`
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Circle detected in image space, serialized as an `[x, y, r]` triple
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct Circle {
    /// Center column, pixels
    pub x: f64,
    /// Center row, pixels
    pub y: f64,
    /// Radius, pixels
    pub r: f64,
}

impl From<(f64, f64, f64)> for Circle {
    fn from((x, y, r): (f64, f64, f64)) -> Self {
        Circle { x, y, r }
    }
}

impl From<Circle> for (f64, f64, f64) {
    fn from(c: Circle) -> Self {
        (c.x, c.y, c.r)
    }
}

/// Motion estimate for one frame. Missing or malformed fields read as zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    /// Mean optical-flow displacement magnitude, units per frame
    #[serde(deserialize_with = "or_default")]
    pub velocity: f64,
    /// Mean displacement direction, degrees
    #[serde(deserialize_with = "or_default")]
    pub direction: f64,
    /// Source frame number as reported by the vision stage
    #[serde(deserialize_with = "or_default")]
    pub frame: i64,
}

/// Circle detections for one frame. Missing or malformed fields read as zero or empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleDetection {
    /// Frame index the detections belong to
    #[serde(deserialize_with = "or_default")]
    pub frame: i64,
    /// Number of generic circles reported by the detector
    #[serde(deserialize_with = "or_default")]
    pub circles_count: u64,
    /// Generic shape-detected circles
    #[serde(deserialize_with = "or_default")]
    pub circles: Vec<Circle>,
    /// Target-colored circles
    #[serde(alias = "target_circles", deserialize_with = "or_default")]
    pub yellow_circles: Vec<Circle>,
}

impl CircleDetection {
    /// True if at least one target-colored circle was found in this frame
    pub fn has_target(&self) -> bool {
        !self.yellow_circles.is_empty()
    }
}

/// Metadata about the recording the perception data came from
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    /// Source video path
    pub path: String,
    /// Frame width, pixels
    pub width: u32,
    /// Frame height, pixels
    pub height: u32,
    /// Frames per second
    pub fps: f64,
    /// Frames read from the video
    pub total_frames: u64,
}

/// Complete output of the vision stage for one recording
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionResult {
    /// Recording metadata, if the vision stage wrote it
    #[serde(deserialize_with = "or_default")]
    pub video_info: Option<VideoInfo>,
    /// Motion observations, one per analysed frame
    pub movement_data: Vec<Observation>,
    /// Circle detection records, tagged with their frame
    pub circle_detection_data: Vec<CircleDetection>,
}

impl PerceptionResult {
    /// Builds a result from in-memory streams, without recording metadata
    pub fn new(movement_data: Vec<Observation>, circle_detection_data: Vec<CircleDetection>) -> Self {
        PerceptionResult {
            video_info: None,
            movement_data,
            circle_detection_data,
        }
    }

    /// Parses the JSON document written by the vision stage
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a `*_analysis.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let file = File::open(path.as_ref())?;
        let result: PerceptionResult = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "Loaded perception data from {}: {} observations, {} detection records",
            path.as_ref().display(),
            result.movement_data.len(),
            result.circle_detection_data.len()
        );
        Ok(result)
    }

    /// First detection record tagged with `frame`; later duplicates are ignored
    pub fn detection_for_frame(&self, frame: usize) -> Option<&CircleDetection> {
        self.circle_detection_data
            .iter()
            .find(|d| d.frame >= 0 && d.frame as usize == frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vision_output_with_missing_fields() {
        let json = r#"{
            "video_info": {"path": "dive.avi", "width": 640, "height": 480, "fps": 25.0, "total_frames": 3},
            "movement_data": [{"velocity": 1.5, "direction": 10.0, "frame": 1}, {"frame": 2}],
            "circle_detection_data": [
                {"frame": 0, "circles_count": 1, "circles": [[10, 20, 5]], "yellow_circles": []},
                {"frame": 1, "target_circles": [[1.0, 2.0, 3.0]]}
            ]
        }"#;
        let result = PerceptionResult::from_json_str(json).unwrap();

        assert_eq!(result.video_info.as_ref().unwrap().total_frames, 3);
        assert_eq!(result.movement_data[1].velocity, 0.0);
        assert_eq!(result.circle_detection_data[0].circles[0], Circle { x: 10.0, y: 20.0, r: 5.0 });
        assert!(result.circle_detection_data[1].has_target());
        assert_eq!(result.circle_detection_data[1].circles_count, 0);
    }

    #[test]
    fn first_record_for_a_frame_wins() {
        let first = CircleDetection { frame: 4, circles_count: 1, ..Default::default() };
        let second = CircleDetection { frame: 4, circles_count: 9, ..Default::default() };
        let result = PerceptionResult::new(Vec::new(), vec![first, second]);

        assert_eq!(result.detection_for_frame(4).unwrap().circles_count, 1);
        assert!(result.detection_for_frame(5).is_none());
    }
}
