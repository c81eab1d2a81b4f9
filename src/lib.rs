//! ROV navigation core
//!
//! This library computes how an underwater remotely-operated vehicle should move to reach a
//! target pose, turns that intent into bounded thruster commands, and scores the quality of
//! navigation decisions inferred from recorded perception data.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod analysis;
pub mod core;
pub mod navigation;

// Re-export commonly used items for easier access
pub use analysis::{
    AnalysisConfig, AnalysisResult, DecisionAnalyzer, DecisionCategory, DecisionRecord,
};
pub use crate::core::{AnalysisSystem, Orientation, PerceptionResult, Position, normalize_angle};
pub use navigation::{
    MotorCommand, MovementController, MovementRequirement, NavigationConfig, PathPlanner,
};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Main configuration structure for the ROV core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RovConfig {
    /// Planner and thruster calibration
    pub navigation: NavigationConfig,
    /// Decision scoring thresholds
    pub analysis: AnalysisConfig,
}

impl RovConfig {
    /// Loads a configuration from a YAML file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: RovConfig = serde_yaml::from_reader(file)?;
        log::info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parses a configuration from a YAML string
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// ROV core error types
#[derive(Debug)]
pub enum RovError {
    /// Reading or writing a file failed
    Io(std::io::Error),
    /// Configuration could not be parsed
    Config(String),
    /// Perception data could not be parsed
    Parse(String),
}

impl std::fmt::Display for RovError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RovError::Io(err) => write!(f, "I/O error: {}", err),
            RovError::Config(msg) => write!(f, "Configuration error: {}", msg),
            RovError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for RovError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RovError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RovError {
    fn from(err: std::io::Error) -> Self {
        RovError::Io(err)
    }
}

impl From<serde_yaml::Error> for RovError {
    fn from(err: serde_yaml::Error) -> Self {
        RovError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for RovError {
    fn from(err: serde_json::Error) -> Self {
        RovError::Parse(err.to_string())
    }
}

/// Result alias used by the I/O facing parts of the crate
pub type Result<T> = std::result::Result<T, RovError>;
