use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::limits::Limits;

/// Segment structure reported by the trajectory generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Phase-boundary timestamps within the motion profile.
    #[serde(default)]
    pub intermediate_durations: Vec<f64>,
}

/// One control-cycle snapshot of every degree of freedom.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub acceleration: Vec<f64>,
    /// Only meaningful on the final sample of a sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<Trajectory>,
}

impl Sample {
    /// Creates a new Sample without segment structure.
    pub fn new(time: f64, position: Vec<f64>, velocity: Vec<f64>, acceleration: Vec<f64>) -> Self {
        Self {
            time,
            position,
            velocity,
            acceleration,
            trajectory: None,
        }
    }

    /// Attaches phase-boundary timestamps to this sample.
    pub fn with_trajectory(mut self, intermediate_durations: Vec<f64>) -> Self {
        self.trajectory = Some(Trajectory {
            intermediate_durations,
        });
        self
    }
}

/// A captured generator run: everything a render call needs besides options.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recording {
    /// Control cycle the samples were produced at.
    #[serde(default)]
    pub delta_time: Option<f64>,
    pub degrees_of_freedom: usize,
    pub limits: Limits,
    pub samples: Vec<Sample>,
}

impl Recording {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
