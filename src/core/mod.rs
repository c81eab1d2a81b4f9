//! Shared building blocks: pose value types, the perception data handed over by the
//! vision stage, and the batch analysis system that ties them to the decision analyzer.

pub mod api;
pub mod perception;
pub mod pose;

// Re-export key types for a unified API
pub use api::{AnalysisSystem, BatchSummary};
pub use perception::{Circle, CircleDetection, Observation, PerceptionResult, VideoInfo};
pub use pose::{Orientation, Position, normalize_angle};
